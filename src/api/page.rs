//! Paged listing query construction.

use crate::error::ValidationError;

/// Largest page Postmark returns for any listing endpoint.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Builds `"{path}?count=..&offset=..[&filters..]"`, rejecting oversized pages.
pub(crate) fn paged_path(
    path: &str,
    count: u32,
    offset: u32,
    filters: &[(&str, &str)],
) -> Result<String, ValidationError> {
    if count > MAX_PAGE_SIZE {
        return Err(ValidationError::PageSizeTooLarge {
            requested: count,
            max: MAX_PAGE_SIZE,
        });
    }

    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("count", &count.to_string());
    query.append_pair("offset", &offset.to_string());
    for (name, value) in filters {
        query.append_pair(name, value);
    }

    Ok(format!("{path}?{}", query.finish()))
}
