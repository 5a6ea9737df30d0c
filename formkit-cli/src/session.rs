//! Applies a batch of intents the way the editor UI would, one gesture at a
//! time, threading the current document through each call.

use crate::config::{ApplyConfig, OutputConfig};
use formkit_model::{EditorIntent, FieldStamp, FormDocument, Result};
use tracing::{debug, warn};

/// Outcome of applying a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub document: FormDocument,
    pub applied: usize,
    /// Position in the batch and reason of every skipped intent.
    pub skipped: Vec<(usize, String)>,
}

/// Applies `intents` to `document` in order.
///
/// With `stop_on_error` the first rejection is returned as the error and no
/// partial result is produced. Otherwise rejected intents are skipped and
/// recorded in the report.
pub fn apply_intents(
    document: &FormDocument,
    intents: &[EditorIntent],
    config: &ApplyConfig,
    clock: &mut FieldStamp,
) -> Result<ApplyReport> {
    let mut report = ApplyReport {
        document: document.clone(),
        applied: 0,
        skipped: Vec::new(),
    };

    for (position, intent) in intents.iter().enumerate() {
        match apply_one(&report.document, intent, config, clock) {
            Ok(next) => {
                report.document = next;
                report.applied += 1;
            }
            Err(e) if config.stop_on_error => return Err(e),
            Err(e) => {
                warn!("Skipping intent #{}: {}", position, e);
                report.skipped.push((position, e.to_string()));
            }
        }
    }

    debug!(
        "Applied {} intents, skipped {}",
        report.applied,
        report.skipped.len()
    );
    Ok(report)
}

fn apply_one(
    document: &FormDocument,
    intent: &EditorIntent,
    config: &ApplyConfig,
    clock: &mut FieldStamp,
) -> Result<FormDocument> {
    if !intent.creates_field() {
        return intent.apply(document, *clock);
    }

    let stamp = clock.tick();
    let next = intent.apply(document, stamp)?;
    *clock = stamp;
    if config.required_by_default {
        next.set_required(&stamp.field_name(), true)
    } else {
        Ok(next)
    }
}

/// Serializes `document` as configured.
pub fn render(document: &FormDocument, output: &OutputConfig) -> Result<String> {
    if output.pretty {
        document.to_json_pretty()
    } else {
        document.to_json()
    }
}
