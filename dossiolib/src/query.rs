//! Параметры списка `GET /dossiers`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            page: 1,
            per_page: 15,
            search: None,
            sort_by: None,
            sort_order: SortOrder::Asc,
        }
    }
}

impl ListQuery {
    /// Пары в порядке `page, per_page, search, sort_by, sort_order`. Пустой поиск не передаётся.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by", sort_by.clone()));
            pairs.push(("sort_order", self.sort_order.as_str().to_string()));
        }
        pairs
    }
}
