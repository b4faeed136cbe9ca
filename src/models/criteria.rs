use serde::{Deserialize, Serialize};

use super::record::string_or_empty;

/// A search: free-text course query plus up to three exact-match facets.
///
/// An empty field places no constraint on its facet. Serialized with the
/// key names the `filters` session entry has always used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "courseInput", default, deserialize_with = "string_or_empty")]
    pub course_query: String,
    #[serde(rename = "dept", default, deserialize_with = "string_or_empty")]
    pub department: String,
    #[serde(rename = "uniInput", default, deserialize_with = "string_or_empty")]
    pub university: String,
    #[serde(rename = "countryInput", default, deserialize_with = "string_or_empty")]
    pub country: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.course_query.is_empty()
            && self.department.is_empty()
            && self.university.is_empty()
            && self.country.is_empty()
    }
}

/// Fields posted by the search form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub country: String,
}

impl From<SearchForm> for FilterCriteria {
    fn from(form: SearchForm) -> Self {
        Self {
            course_query: form.course.trim().to_string(),
            department: form.department,
            university: form.university,
            country: form.country,
        }
    }
}
