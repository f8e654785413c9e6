use std::collections::HashSet;

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::{parse_uuid, ExtraData};
use crate::errors::ServiceError;

/// User filters posted to the user search endpoint.
///
/// Identifiers stay as raw strings until a caller asks for them, so a
/// malformed id is reported with the value the client actually sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserSearchParams {
    #[serde(default, rename = "id")]
    #[schema(value_type = Vec<String>)]
    pub ids: HashSet<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub home_facility_id: Option<String>,
    pub verified: Option<bool>,
    pub active: Option<bool>,
    pub login_restricted: Option<bool>,
    #[serde(default)]
    pub extra_data: ExtraData,
}

impl UserSearchParams {
    /// True when no filter is set at all.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
            && self.username.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.home_facility_id.is_none()
            && self.verified.is_none()
            && self.active.is_none()
            && self.login_restricted.is_none()
            && self.extra_data.is_empty()
    }

    pub fn ids(&self) -> Result<HashSet<Uuid>, ServiceError> {
        self.ids.iter().map(|raw| parse_uuid(raw)).collect()
    }

    pub fn home_facility_uuid(&self) -> Result<Option<Uuid>, ServiceError> {
        self.home_facility_id.as_deref().map(parse_uuid).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;
    use assert_matches::assert_matches;
    use rstest::rstest;

    fn with(f: impl FnOnce(&mut UserSearchParams)) -> UserSearchParams {
        let mut params = UserSearchParams::default();
        f(&mut params);
        params
    }

    #[test]
    fn default_params_are_empty() {
        assert!(UserSearchParams::default().is_empty());
    }

    #[rstest]
    #[case::ids(with(|p| { p.ids.insert(Uuid::new_v4().to_string()); }))]
    #[case::username(with(|p| p.username = Some("jdoe".into())))]
    #[case::first_name(with(|p| p.first_name = Some("John".into())))]
    #[case::last_name(with(|p| p.last_name = Some("Doe".into())))]
    #[case::email(with(|p| p.email = Some("jdoe@example.org".into())))]
    #[case::home_facility(with(|p| p.home_facility_id = Some(Uuid::new_v4().to_string())))]
    #[case::verified(with(|p| p.verified = Some(false)))]
    #[case::active(with(|p| p.active = Some(true)))]
    #[case::login_restricted(with(|p| p.login_restricted = Some(false)))]
    #[case::extra_data(with(|p| { p.extra_data.insert("k".into(), "v".into()); }))]
    fn any_single_field_makes_params_non_empty(#[case] params: UserSearchParams) {
        assert!(!params.is_empty());
    }

    #[test]
    fn ids_parse_all_uuid_forms() {
        let id = Uuid::new_v4();
        let params = with(|p| {
            p.ids.insert(id.to_string());
            p.ids.insert(id.simple().to_string());
            p.ids.insert(id.to_string().to_uppercase());
        });

        assert_eq!(params.ids().unwrap(), HashSet::from([id]));
    }

    #[test]
    fn malformed_id_is_a_validation_error() {
        let params = with(|p| {
            p.ids.insert("12345".into());
        });

        assert_matches!(params.ids(), Err(ServiceError::ValidationError(msg)) => {
            assert_eq!(msg.key, messages::ERROR_INVALID_UUID);
            assert_eq!(msg.params, vec!["12345".to_string()]);
        });
    }

    #[test]
    fn home_facility_uuid_parses_or_fails() {
        let id = Uuid::new_v4();
        assert_eq!(
            with(|p| p.home_facility_id = Some(id.to_string()))
                .home_facility_uuid()
                .unwrap(),
            Some(id)
        );
        assert_eq!(UserSearchParams::default().home_facility_uuid().unwrap(), None);
        assert_matches!(
            with(|p| p.home_facility_id = Some("nope".into())).home_facility_uuid(),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn body_uses_wire_names() {
        let params: UserSearchParams = serde_json::from_value(serde_json::json!({
            "id": ["a"],
            "homeFacilityId": "b",
            "loginRestricted": true
        }))
        .unwrap();

        assert!(params.ids.contains("a"));
        assert_eq!(params.home_facility_id.as_deref(), Some("b"));
        assert_eq!(params.login_restricted, Some(true));
    }
}
