//! Systems that log compass setup and interaction lifecycle messages.
use bevy::{
    ecs::message::MessageReader,
    log::{error, info, warn},
    prelude::*,
};

use crate::compass::{resolve::body_label, tracker::HeadingTracker};
use crate::diagnostics::report::{FindingLevel, SetupReport, SetupSubject};
use crate::interaction::{
    components::{Grabbable, Player},
    messages::{GrabEnded, GrabStarted, HoverEnded, HoverStarted},
};

/// Builds one setup report per compass-like entity in the scene.
#[allow(clippy::type_complexity)]
pub fn collect_setup_reports(
    bodies: &Query<
        (
            Entity,
            Option<&Name>,
            Option<&Grabbable>,
            Option<&HeadingTracker>,
            Has<Transform>,
        ),
        Or<(With<HeadingTracker>, With<Grabbable>)>,
    >,
    names: &Query<&Name>,
    interactors: &Query<(Entity, Option<&Name>), With<Player>>,
) -> Vec<SetupReport> {
    let interactor_names: Vec<String> = interactors
        .iter()
        .map(|(entity, name)| body_label(entity, name))
        .collect();

    bodies
        .iter()
        .map(|(entity, name, grabbable, tracker, has_transform)| {
            let needle_name = tracker
                .and_then(|tracker| tracker.needle())
                .and_then(|needle| names.get(needle).ok())
                .map(|name| name.as_str());
            let subject = SetupSubject {
                label: body_label(entity, name),
                grabbable,
                tracker,
                needle_name,
                has_transform,
            };
            SetupReport::inspect(&subject, &interactor_names)
        })
        .collect()
}

/// Logs a one-off report of every compass once needles have been resolved.
#[allow(clippy::type_complexity)]
pub fn log_compass_setup(
    bodies: Query<
        (
            Entity,
            Option<&Name>,
            Option<&Grabbable>,
            Option<&HeadingTracker>,
            Has<Transform>,
        ),
        Or<(With<HeadingTracker>, With<Grabbable>)>,
    >,
    names: Query<&Name>,
    interactors: Query<(Entity, Option<&Name>), With<Player>>,
) {
    let reports = collect_setup_reports(&bodies, &names, &interactors);
    if reports.is_empty() {
        warn!("Compass setup: no compass or grabbable found in the scene");
        return;
    }

    for report in &reports {
        info!("=== Compass setup: {} ===", report.subject);
        for finding in &report.findings {
            match finding.level {
                FindingLevel::Ok => info!("  {}", finding),
                FindingLevel::Warning => warn!("  {}", finding),
                FindingLevel::Missing => error!("  {}", finding),
            }
        }
    }
}

/// Which interaction lifecycle hook fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    HoverStarted,
    HoverEnded,
    Grabbed,
    Released,
}

/// Renders one interaction log line.
pub fn describe_interaction(kind: InteractionKind, interactor: &str, target: &str) -> String {
    match kind {
        InteractionKind::HoverStarted => {
            format!("HOVER STARTED: {} is hovering over {}", interactor, target)
        }
        InteractionKind::HoverEnded => {
            format!("HOVER ENDED: {} stopped hovering over {}", interactor, target)
        }
        InteractionKind::Grabbed => format!("GRABBED: {} grabbed {}", interactor, target),
        InteractionKind::Released => format!("RELEASED: {} released {}", interactor, target),
    }
}

/// Reads every pending interaction message and renders it, hover before grab.
pub fn drain_interaction_lines(
    hover_started: &mut MessageReader<HoverStarted>,
    hover_ended: &mut MessageReader<HoverEnded>,
    grab_started: &mut MessageReader<GrabStarted>,
    grab_ended: &mut MessageReader<GrabEnded>,
    names: &Query<&Name>,
) -> Vec<String> {
    let label = |entity: Entity| body_label(entity, names.get(entity).ok());
    let mut lines = Vec::new();

    for message in hover_started.read() {
        lines.push(describe_interaction(
            InteractionKind::HoverStarted,
            &message.interactor,
            &label(message.target),
        ));
    }
    for message in hover_ended.read() {
        lines.push(describe_interaction(
            InteractionKind::HoverEnded,
            &message.interactor,
            &label(message.target),
        ));
    }
    for message in grab_started.read() {
        lines.push(describe_interaction(
            InteractionKind::Grabbed,
            &message.interactor,
            &label(message.target),
        ));
    }
    for message in grab_ended.read() {
        lines.push(describe_interaction(
            InteractionKind::Released,
            &message.interactor,
            &label(message.target),
        ));
    }
    lines
}

/// Logs hover and grab lifecycle messages with readable names.
pub fn log_interaction_messages(
    mut hover_started: MessageReader<HoverStarted>,
    mut hover_ended: MessageReader<HoverEnded>,
    mut grab_started: MessageReader<GrabStarted>,
    mut grab_ended: MessageReader<GrabEnded>,
    names: Query<&Name>,
) {
    let lines = drain_interaction_lines(
        &mut hover_started,
        &mut hover_ended,
        &mut grab_started,
        &mut grab_ended,
        &names,
    );
    for line in lines {
        info!("{}", line);
    }
}
