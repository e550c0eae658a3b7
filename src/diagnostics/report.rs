//! Startup report describing whether a compass is wired up for interaction.
use std::fmt;

use bevy::prelude::*;

use crate::compass::{resolve::NEEDLE_NAME, tracker::HeadingTracker};
use crate::interaction::components::Grabbable;

/// Severity of a single report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingLevel {
    Ok,
    Warning,
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupFinding {
    pub level: FindingLevel,
    pub message: String,
}

impl SetupFinding {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Ok,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Warning,
            message: message.into(),
        }
    }

    fn missing(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Missing,
            message: message.into(),
        }
    }
}

impl fmt::Display for SetupFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            FindingLevel::Ok => "ok",
            FindingLevel::Warning => "warn",
            FindingLevel::Missing => "missing",
        };
        write!(f, "[{}] {}", marker, self.message)
    }
}

/// What the report looked at for one compass body.
pub struct SetupSubject<'a> {
    pub label: String,
    pub grabbable: Option<&'a Grabbable>,
    pub tracker: Option<&'a HeadingTracker>,
    pub needle_name: Option<&'a str>,
    pub has_transform: bool,
}

/// Findings for one compass body.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub subject: String,
    pub findings: Vec<SetupFinding>,
}

impl SetupReport {
    pub fn inspect(subject: &SetupSubject<'_>, interactors: &[String]) -> Self {
        let mut findings = Vec::new();

        match subject.grabbable {
            Some(grabbable) => {
                findings.push(SetupFinding::ok(format!(
                    "Grabbable found (hover range {:.2}, hold offset {:?})",
                    grabbable.hover_range, grabbable.hold_offset
                )));
                if grabbable.hover_range <= 0.0 {
                    findings.push(SetupFinding::warning(
                        "Hover range is not positive; the compass can never be grabbed",
                    ));
                }
            }
            None => findings.push(SetupFinding::missing("Grabbable component not found")),
        }

        if subject.has_transform {
            findings.push(SetupFinding::ok("Transform found"));
        } else {
            findings.push(SetupFinding::missing(
                "Transform not found; heading cannot be read",
            ));
        }

        match subject.tracker {
            Some(tracker) => {
                let smoothing = tracker.settings().smoothing;
                findings.push(SetupFinding::ok(format!(
                    "HeadingTracker found (smoothing {}, north {:?})",
                    smoothing.name(),
                    tracker.horizontal_north()
                )));
                match (tracker.needle(), subject.needle_name) {
                    (Some(needle), Some(name)) => findings.push(SetupFinding::ok(format!(
                        "Needle linked: {} ({:?})",
                        name, needle
                    ))),
                    (Some(needle), None) => findings.push(SetupFinding::ok(format!(
                        "Needle linked: {:?}",
                        needle
                    ))),
                    (None, _) => findings.push(SetupFinding::missing(format!(
                        "Needle not linked; add a child named '{}' or call set_needle",
                        NEEDLE_NAME
                    ))),
                }
            }
            None => findings.push(SetupFinding::missing("HeadingTracker component not found")),
        }

        if interactors.is_empty() {
            findings.push(SetupFinding::warning(
                "No interactor in the scene; make sure the player camera is spawned",
            ));
        } else {
            findings.push(SetupFinding::ok(format!(
                "Found {} interactor(s): {}",
                interactors.len(),
                interactors.join(", ")
            )));
        }

        Self {
            subject: subject.label.clone(),
            findings,
        }
    }

    pub fn problems(&self) -> impl Iterator<Item = &SetupFinding> {
        self.findings
            .iter()
            .filter(|finding| finding.level != FindingLevel::Ok)
    }

    pub fn is_healthy(&self) -> bool {
        self.problems().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compass::tracker::TrackerSettings;

    fn subject<'a>(
        grabbable: Option<&'a Grabbable>,
        tracker: Option<&'a HeadingTracker>,
    ) -> SetupSubject<'a> {
        SetupSubject {
            label: "Compass".to_string(),
            grabbable,
            tracker,
            needle_name: Some(NEEDLE_NAME),
            has_transform: true,
        }
    }

    #[test]
    fn complete_setup_is_healthy() {
        let needle = World::new().spawn_empty().id();
        let tracker = HeadingTracker::with_needle(TrackerSettings::default(), needle);
        let grabbable = Grabbable::default();

        let report = SetupReport::inspect(
            &subject(Some(&grabbable), Some(&tracker)),
            &["Player".to_string()],
        );

        assert!(report.is_healthy(), "{:?}", report.findings);
        assert_eq!(report.subject, "Compass");
    }

    #[test]
    fn missing_pieces_are_reported() {
        let tracker = HeadingTracker::new(TrackerSettings::default());
        let report = SetupReport::inspect(&subject(None, Some(&tracker)), &[]);

        let problems: Vec<_> = report.problems().collect();
        assert_eq!(problems.len(), 3);
        assert!(problems
            .iter()
            .any(|finding| finding.message.contains("Grabbable")));
        assert!(problems
            .iter()
            .any(|finding| finding.message.contains(NEEDLE_NAME)));
        assert!(problems
            .iter()
            .any(|finding| finding.level == FindingLevel::Warning));
    }

    #[test]
    fn findings_render_with_marker() {
        let finding = SetupFinding::missing("Transform not found");
        assert_eq!(finding.to_string(), "[missing] Transform not found");
    }
}
