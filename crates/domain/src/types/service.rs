//! Small enums and payload types used by the service endpoints

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// OSS bucket retention policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRetention {
    /// Objects are deleted after 24 hours
    Transient,
    /// Objects are deleted after 30 days
    Temporary,
    /// Objects are kept until deleted
    Persistent,
}

impl_wire_enum_conversions!(DataRetention {
    Transient => "transient",
    Temporary => "temporary",
    Persistent => "persistent",
});

/// Data center region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Us,
    Emea,
}

impl_wire_enum_conversions!(Region {
    Us => "US",
    Emea => "EMEA",
});

impl Region {
    /// Path prefix model derivative uses for this region
    #[must_use]
    pub const fn derivative_prefix(&self) -> &'static str {
        match self {
            Self::Us => "",
            Self::Emea => "/regions/eu",
        }
    }
}

/// `response_type` of the three-legged authorization request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Authorization code grant
    Code,
    /// Implicit grant
    Token,
}

impl_wire_enum_conversions!(ResponseType {
    Code => "code",
    Token => "token",
});

/// Folder permission presets, each expanding to a list of document actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionAction {
    ViewOnly,
    ViewDownload,
    UploadOnly,
    ViewDownloadUpload,
    ViewDownloadUploadEdit,
    FullController,
}

impl PermissionAction {
    /// Actions granted by the preset
    #[must_use]
    pub fn actions(&self) -> Vec<&'static str> {
        let mut actions = match self {
            Self::UploadOnly => return vec!["PUBLISH"],
            _ => vec!["VIEW", "COLLABORATE"],
        };
        let extra: &[&'static str] = match self {
            Self::ViewOnly | Self::UploadOnly => &[],
            Self::ViewDownload => &["DOWNLOAD"],
            Self::ViewDownloadUpload => &["DOWNLOAD", "PUBLISH"],
            Self::ViewDownloadUploadEdit => &["DOWNLOAD", "PUBLISH", "EDIT"],
            Self::FullController => &["DOWNLOAD", "PUBLISH", "EDIT", "CONTROL"],
        };
        actions.extend_from_slice(extra);
        actions
    }
}

/// Permission subject for a folder batch update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_id: String,
    pub subject_type: String,
    pub actions: Vec<String>,
}

impl Subject {
    /// Subject granted one of the permission presets
    #[must_use]
    pub fn with_preset(
        subject_id: impl Into<String>,
        subject_type: impl Into<String>,
        preset: PermissionAction,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            subject_type: subject_type.into(),
            actions: preset.actions().into_iter().map(str::to_string).collect(),
        }
    }
}
