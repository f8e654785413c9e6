//! Common types shared across repositories, services and handlers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::messages;

/// Free-form string attributes attached to facilities and users.
pub type ExtraData = BTreeMap<String, String>;

/// A 0-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus the metadata clients use to walk the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// 0-based page number
    pub number: u64,
    pub size: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Wraps one already-sliced page of a result set of `total_elements` rows.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size.max(1));
        Self {
            number_of_elements: content.len() as u64,
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Slices a fully loaded result list in memory.
    pub fn from_vec(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len() as u64;
        let content = items
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.size).unwrap_or(usize::MAX))
            .collect();
        Self::new(content, request, total)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
        }
    }
}

/// Parses an identifier supplied as text, failing with a validation error.
pub fn parse_uuid(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ServiceError::validation(messages::ERROR_INVALID_UUID, raw))
}

/// Stored form of an extra-data map; `None` when the map is empty.
pub fn extra_data_to_json(extra_data: &ExtraData) -> Option<JsonValue> {
    if extra_data.is_empty() {
        return None;
    }
    let object = extra_data
        .iter()
        .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
        .collect();
    Some(JsonValue::Object(object))
}

/// Reads a stored extra-data object back into a string map.
/// Non-string values are kept in their JSON text form.
pub fn extra_data_from_json(stored: Option<&JsonValue>) -> ExtraData {
    match stored {
        Some(JsonValue::Object(object)) => object
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect(),
        _ => ExtraData::new(),
    }
}

/// True when every wanted key is present in `stored` with the same value.
pub fn contains_extra_data(stored: Option<&JsonValue>, wanted: &ExtraData) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let stored = extra_data_from_json(stored);
    wanted
        .iter()
        .all(|(key, value)| stored.get(key) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn page_metadata_for_middle_page() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 1);
        assert_eq!(page.number_of_elements, 2);
        assert!(!page.first);
        assert!(!page.last);
    }

    #[test]
    fn empty_page_is_first_and_last() {
        let page: Page<u8> = Page::empty(PageRequest::new(0, 10));
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
    }

    #[test]
    fn from_vec_slices_in_memory() {
        let page = Page::from_vec((0..7).collect::<Vec<_>>(), PageRequest::new(1, 3));
        assert_eq!(page.content, vec![3, 4, 5]);
        assert_eq!(page.total_elements, 7);

        let beyond = Page::from_vec((0..7).collect::<Vec<_>>(), PageRequest::new(5, 3));
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_elements, 7);
    }

    #[test]
    fn page_serializes_camel_case() {
        let value = serde_json::to_value(Page::new(vec!["a"], PageRequest::new(0, 20), 1)).unwrap();
        assert_eq!(value["content"], json!(["a"]));
        assert_eq!(value["totalElements"], json!(1));
        assert_eq!(value["number"], json!(0));
        assert_eq!(value["size"], json!(20));
    }

    #[test]
    fn last_page_flag_survives_the_largest_page_number() {
        let page: Page<u8> = Page::empty(PageRequest::new(u64::MAX, 10));
        assert!(page.last);
        assert!(!page.first);
    }

    #[test]
    fn zero_size_is_raised_to_one() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn parse_uuid_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string()).unwrap(), id);
        assert_matches!(parse_uuid("not-a-uuid"), Err(ServiceError::ValidationError(msg)) => {
            assert_eq!(msg.key, messages::ERROR_INVALID_UUID);
            assert_eq!(msg.params, vec!["not-a-uuid".to_string()]);
        });
    }

    #[test]
    fn extra_data_containment() {
        let stored = json!({"region": "north", "level": "2", "beds": 10});
        let mut wanted = ExtraData::new();
        assert!(contains_extra_data(Some(&stored), &wanted));

        wanted.insert("region".into(), "north".into());
        wanted.insert("beds".into(), "10".into());
        assert!(contains_extra_data(Some(&stored), &wanted));

        wanted.insert("level".into(), "3".into());
        assert!(!contains_extra_data(Some(&stored), &wanted));
        assert!(!contains_extra_data(None, &wanted));
    }

    #[test]
    fn extra_data_round_trips_through_json() {
        assert_eq!(extra_data_to_json(&ExtraData::new()), None);

        let mut map = ExtraData::new();
        map.insert("k".into(), "v".into());
        let stored = extra_data_to_json(&map);
        assert_eq!(extra_data_from_json(stored.as_ref()), map);
    }
}
