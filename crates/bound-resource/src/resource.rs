//! The view of an entity under reconciliation.

use serde::{Deserialize, Serialize};

/// Coarse status of a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Loading,
    Success,
    Error,
}

/// Current view of a cached entity while it is being refreshed.
///
/// Every variant carries the best-known cached value, so consumers can keep
/// rendering stale data while loading or after a failed refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resource<T> {
    /// A refresh is in progress; `data` is what the cache holds right now.
    Loading { data: Option<T> },
    /// The refresh completed and `data` was re-read from the cache.
    Success { data: Option<T> },
    /// The refresh failed; `data` is the last cached value observed.
    Error { message: String, data: Option<T> },
}

impl<T> Resource<T> {
    pub fn loading(data: Option<T>) -> Self {
        Resource::Loading { data }
    }

    pub fn success(data: Option<T>) -> Self {
        Resource::Success { data }
    }

    pub fn error(message: impl Into<String>, data: Option<T>) -> Self {
        Resource::Error {
            message: message.into(),
            data,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Resource::Loading { .. } => Status::Loading,
            Resource::Success { .. } => Status::Success,
            Resource::Error { .. } => Status::Error,
        }
    }

    /// The cached value carried by this view, whatever the status.
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Loading { data } | Resource::Success { data } | Resource::Error { data, .. } => {
                data.as_ref()
            }
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Loading { data } | Resource::Success { data } | Resource::Error { data, .. } => {
                data
            }
        }
    }

    /// The failure message for `Error`, `None` otherwise.
    pub fn message(&self) -> Option<&str> {
        match self {
            Resource::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True for `Success` and `Error`: nothing follows them in a cycle.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resource::Loading { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Loading { data } => Resource::Loading { data: data.map(f) },
            Resource::Success { data } => Resource::Success { data: data.map(f) },
            Resource::Error { message, data } => Resource::Error {
                message,
                data: data.map(f),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_is_kept_in_every_variant() {
        assert_eq!(Resource::loading(Some(1)).data(), Some(&1));
        assert_eq!(Resource::success(Some(2)).data(), Some(&2));
        assert_eq!(Resource::error("offline", Some(3)).data(), Some(&3));
        assert_eq!(Resource::<i32>::loading(None).data(), None);
    }

    #[test]
    fn status_and_terminality() {
        let loading = Resource::loading(Some("cached"));
        assert_eq!(loading.status(), Status::Loading);
        assert!(!loading.is_terminal());

        let success = Resource::success(Some("fresh"));
        assert_eq!(success.status(), Status::Success);
        assert!(success.is_terminal());

        let error = Resource::error("timeout", Some("cached"));
        assert_eq!(error.status(), Status::Error);
        assert_eq!(error.message(), Some("timeout"));
        assert!(error.is_terminal());
    }

    #[test]
    fn map_preserves_variant_and_message() {
        let mapped = Resource::error("404", Some(vec![1, 2, 3])).map(|v| v.len());
        assert_eq!(mapped, Resource::error("404", Some(3)));
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(Resource::error("offline", Some(7))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "offline", "data": 7})
        );
    }
}
