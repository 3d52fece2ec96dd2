//! List-query contract for form listings: equality predicates plus bounded,
//! 1-indexed pagination. The SQL fragments produced here are the only place
//! the listing's WHERE/LIMIT text is assembled.

use crate::error::ValidationError;

/// Equality predicates for the form listing. Absent fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct FormFilter {
    pub employee_id: Option<String>,
    pub department: Option<String>,
}

impl FormFilter {
    /// Build from raw query values. Empty strings behave exactly like absent
    /// parameters: stored rows never have empty fields, so an empty equality
    /// predicate could only ever match nothing.
    pub fn from_query(employee_id: Option<String>, department: Option<String>) -> Self {
        Self {
            employee_id: employee_id.filter(|v| !v.is_empty()),
            department: department.filter(|v| !v.is_empty()),
        }
    }

    /// Build the WHERE clause with numbered parameters starting at
    /// `starting_param_index`, plus the values to bind in order. Returns an
    /// empty string when nothing constrains, so both the page query and the
    /// count query can append it verbatim.
    pub fn where_clause(&self, starting_param_index: usize) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(employee_id) = &self.employee_id {
            conditions.push(format!("employee_id = ${}", starting_param_index + params.len()));
            params.push(employee_id.clone());
        }
        if let Some(department) = &self.department {
            conditions.push(format!("department = ${}", starting_param_index + params.len()));
            params.push(department.clone());
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

/// A validated, 1-indexed page request.
///
/// Construction is the validation: `page >= 1` and `limit >= 1` are hard
/// requirements, while a limit above `max_size` is capped rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
    size: i64,
}

impl Page {
    pub fn new(number: i64, size: i64, max_size: i64) -> Result<Self, ValidationError> {
        if number < 1 {
            return Err(ValidationError::new("page", "must be at least 1"));
        }
        if size < 1 {
            return Err(ValidationError::new("limit", "must be at least 1"));
        }

        let size = if size > max_size {
            tracing::warn!("Limit {} exceeds max {}, capping to max", size, max_size);
            max_size
        } else {
            size
        };

        Ok(Self { number, size })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        // Saturating: an offset past the data just reads as an empty page.
        (self.number - 1).saturating_mul(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_produces_no_where() {
        let (clause, params) = FormFilter::default().where_clause(1);
        assert_eq!(clause, "");
        assert!(params.is_empty());
    }

    #[test]
    fn test_single_predicate() {
        let filter = FormFilter {
            employee_id: Some("EMP-001".into()),
            department: None,
        };
        let (clause, params) = filter.where_clause(1);
        assert_eq!(clause, " WHERE employee_id = $1");
        assert_eq!(params, vec!["EMP-001".to_string()]);

        let filter = FormFilter {
            employee_id: None,
            department: Some("Engineering".into()),
        };
        let (clause, params) = filter.where_clause(1);
        assert_eq!(clause, " WHERE department = $1");
        assert_eq!(params, vec!["Engineering".to_string()]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let filter = FormFilter {
            employee_id: Some("EMP-001".into()),
            department: Some("Engineering".into()),
        };
        let (clause, params) = filter.where_clause(1);
        assert_eq!(clause, " WHERE employee_id = $1 AND department = $2");
        assert_eq!(params, vec!["EMP-001".to_string(), "Engineering".to_string()]);
    }

    #[test]
    fn test_param_numbering_respects_start() {
        let filter = FormFilter {
            employee_id: Some("EMP-001".into()),
            department: Some("Engineering".into()),
        };
        let (clause, _) = filter.where_clause(3);
        assert_eq!(clause, " WHERE employee_id = $3 AND department = $4");
    }

    #[test]
    fn test_empty_query_values_do_not_filter() {
        let filter = FormFilter::from_query(Some(String::new()), Some("Engineering".into()));
        let (clause, params) = filter.where_clause(1);
        assert_eq!(clause, " WHERE department = $1");
        assert_eq!(params, vec!["Engineering".to_string()]);

        let filter = FormFilter::from_query(Some(String::new()), Some(String::new()));
        let (clause, params) = filter.where_clause(1);
        assert_eq!(clause, "");
        assert!(params.is_empty());
    }

    #[test]
    fn test_page_must_be_one_indexed() {
        assert_eq!(Page::new(0, 10, 100).unwrap_err().field, "page");
        assert_eq!(Page::new(-2, 10, 100).unwrap_err().field, "page");
    }

    #[test]
    fn test_limit_must_be_positive() {
        assert_eq!(Page::new(1, 0, 100).unwrap_err().field, "limit");
        assert_eq!(Page::new(1, -5, 100).unwrap_err().field, "limit");
    }

    #[test]
    fn test_oversized_limit_is_capped_not_rejected() {
        let page = Page::new(1, 500, 100).unwrap();
        assert_eq!(page.size(), 100);
    }

    #[test]
    fn test_offset_math() {
        assert_eq!(Page::new(1, 10, 100).unwrap().offset(), 0);
        assert_eq!(Page::new(3, 10, 100).unwrap().offset(), 20);
        assert_eq!(Page::new(2, 25, 100).unwrap().offset(), 25);
    }

    #[test]
    fn test_offset_saturates_at_extreme_pages() {
        let page = Page::new(i64::MAX, 100, 100).unwrap();
        assert_eq!(page.offset(), i64::MAX);
    }
}
