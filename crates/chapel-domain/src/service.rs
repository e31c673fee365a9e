//! Worship service labels used to key attendance.

use serde::{Deserialize, Serialize};

/// Which weekly service an attendance record belongs to.
///
/// Wire format is the Korean label (e.g. `"주일1부"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "주일1부")]
    SundayFirst,
    #[serde(rename = "주일2부")]
    SundaySecond,
    #[default]
    #[serde(rename = "주일3부")]
    SundayThird,
    #[serde(rename = "수요예배")]
    Wednesday,
    #[serde(rename = "금요기도회")]
    FridayPrayer,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        Self::SundayFirst,
        Self::SundaySecond,
        Self::SundayThird,
        Self::Wednesday,
        Self::FridayPrayer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SundayFirst => "주일1부",
            Self::SundaySecond => "주일2부",
            Self::SundayThird => "주일3부",
            Self::Wednesday => "수요예배",
            Self::FridayPrayer => "금요기도회",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == s)
    }
}
