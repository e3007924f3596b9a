//! Lead scoring and pipeline status enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::place::Place;
use crate::CoreError;

/// Computed outreach priority for a qualified lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadScore {
    Hot,
    Warm,
    Cold,
}

impl LeadScore {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeadScore::Hot => "Hot",
            LeadScore::Warm => "Warm",
            LeadScore::Cold => "Cold",
        }
    }
}

impl fmt::Display for LeadScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales pipeline stage of a saved lead.
///
/// [`LeadStatus::ALL`] is the single source of truth for both the accepted
/// label set and the display order of status summaries. Transitions are
/// fully permissive: any status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Interested,
    Closed,
    Lost,
}

impl LeadStatus {
    /// All statuses in pipeline display order.
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Interested,
        LeadStatus::Closed,
        LeadStatus::Lost,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Interested => "Interested",
            LeadStatus::Closed => "Closed",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}

/// A place that passed every qualification predicate, plus its score and
/// the WhatsApp-dialable phone derived during qualification.
///
/// Exists only for the duration of one search session; saving it to the
/// pipeline goes through the coordinator's dedup-checked add path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedLead {
    pub place: Place,
    pub score: LeadScore,
    pub whatsapp_phone: String,
}

impl QualifiedLead {
    /// Display phone: the provider-formatted national number when present,
    /// otherwise the international one, otherwise the derived WhatsApp form.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.place
            .national_phone
            .as_deref()
            .or(self.place.international_phone.as_deref())
            .unwrap_or(&self.whatsapp_phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_labels() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!("contacted".parse::<LeadStatus>().unwrap(), LeadStatus::Contacted);
        assert_eq!(" CLOSED ".parse::<LeadStatus>().unwrap(), LeadStatus::Closed);
    }

    #[test]
    fn status_parse_rejects_unknown_labels() {
        let err = "Archived".parse::<LeadStatus>();
        assert!(
            matches!(err, Err(CoreError::InvalidStatus(ref s)) if s == "Archived"),
            "expected InvalidStatus, got: {err:?}"
        );
    }

    #[test]
    fn display_order_starts_at_new_and_ends_at_lost() {
        assert_eq!(LeadStatus::ALL.first(), Some(&LeadStatus::New));
        assert_eq!(LeadStatus::ALL.last(), Some(&LeadStatus::Lost));
    }
}
