//! Catalog HTTP bodies

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Method;

/// Response for a method listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodList {
    pub methods: Vec<Method>,
    pub count: usize,
    /// Method type the listing was restricted to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl MethodList {
    pub fn new(methods: Vec<Method>, filter: Option<String>) -> Self {
        Self {
            count: methods.len(),
            methods,
            filter,
        }
    }
}
