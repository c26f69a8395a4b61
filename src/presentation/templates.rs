//! Askama template for the upload form.

use askama::Template;

use crate::core::models::OcrLanguage;
use crate::global_constants;

pub struct LanguageOption {
    pub label: String,
    pub selected: bool,
}

impl LanguageOption {
    fn list_with_selected(selected: OcrLanguage) -> Vec<Self> {
        OcrLanguage::ALL
            .iter()
            .map(|language| Self {
                label: language.to_string(),
                selected: *language == selected,
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub application_name: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub languages: Vec<LanguageOption>,
    pub keyword: &'a str,
    pub extracted_text: &'a str,
    pub result_text: &'a str,
}

impl<'a> IndexTemplate<'a> {
    pub fn build(
        language: OcrLanguage,
        keyword: &'a str,
        extracted_text: &'a str,
        result_text: &'a str,
    ) -> Self {
        Self {
            application_name: global_constants::APPLICATION_NAME,
            title: global_constants::APPLICATION_TITLE,
            description: global_constants::APPLICATION_DESCRIPTION,
            languages: LanguageOption::list_with_selected(language),
            keyword,
            extracted_text,
            result_text,
        }
    }

    pub fn empty(language: OcrLanguage) -> Self {
        Self::build(language, "", "", "")
    }
}
