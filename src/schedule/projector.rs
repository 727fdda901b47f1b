use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::data::{DoseHistory, DoseRecord, DosingProtocol, ProtocolError};
use crate::schedule::types::ProjectionOptions;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

type Slot = (NaiveDate, String);

/// Calendar dates a protocol schedules, ignoring any existing history
///
/// A date-time cursor starts at midnight of `start_date` and is advanced by the
/// interval on every step, so fractional intervals accumulate the way repeated date
/// arithmetic does. The candidate is the cursor's calendar day. Iteration stops once
/// the candidate passes the stop date, or `today` for ongoing protocols.
///
/// Archived or invalid protocols yield no dates. Intervals shorter than a day can
/// schedule the same date more than once.
pub fn schedule_dates(protocol: &DosingProtocol, today: NaiveDate) -> Vec<NaiveDate> {
    if protocol.is_archived() || protocol.validate().is_err() {
        return Vec::new();
    }

    let step_ms = (protocol.interval_days() * MILLIS_PER_DAY).round() as i64;
    if step_ms <= 0 {
        tracing::warn!(
            protocol = protocol.id(),
            interval_days = protocol.interval_days(),
            "interval rounds to zero, nothing scheduled"
        );
        return Vec::new();
    }
    let step = Duration::milliseconds(step_ms);

    let end = protocol.end_date(today);
    let mut dates = Vec::new();
    let mut cursor = protocol.start_date().and_time(NaiveTime::MIN);
    while cursor.date() <= end {
        dates.push(cursor.date());
        cursor = match cursor.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Expand one protocol into the slots not already taken in `occupied`
///
/// A date scheduled more than once by the same protocol is emitted once.
fn expand(
    protocol: &DosingProtocol,
    occupied: &HashSet<Slot>,
    today: NaiveDate,
) -> Vec<DoseRecord> {
    let mut own = HashSet::new();
    let mut doses = Vec::new();
    for date in schedule_dates(protocol, today) {
        let slot = (date, protocol.medication().to_string());
        if occupied.contains(&slot) || !own.insert(date) {
            continue;
        }
        doses.push(DoseRecord::generated(
            date,
            protocol.medication(),
            protocol.dose_amount(),
            protocol.half_life_hours(),
        ));
    }
    tracing::debug!(
        protocol = protocol.id(),
        medication = protocol.medication(),
        doses = doses.len(),
        "projected protocol"
    );
    doses
}

fn occupied_slots<'a, I>(existing: I) -> HashSet<Slot>
where
    I: IntoIterator<Item = &'a DoseRecord>,
{
    existing
        .into_iter()
        .map(|r| (r.date(), r.medication().to_string()))
        .collect()
}

fn sort_doses(doses: &mut [DoseRecord]) {
    doses.sort_by(|a, b| {
        a.date()
            .cmp(&b.date())
            .then_with(|| a.medication().cmp(b.medication()))
    });
}

/// Expansion order: by start date, then id, then amount
fn precedence(a: &DosingProtocol, b: &DosingProtocol) -> Ordering {
    a.start_date()
        .cmp(&b.start_date())
        .then_with(|| a.id().cmp(b.id()))
        .then_with(|| a.dose_amount().total_cmp(&b.dose_amount()))
}

/// Doses a single protocol adds on top of `existing`
///
/// Dates whose `(date, medication)` slot is already taken in `existing` are skipped,
/// whether the existing record was logged by hand or generated earlier.
pub fn project_protocol(
    protocol: &DosingProtocol,
    existing: &[DoseRecord],
    options: &ProjectionOptions,
) -> Vec<DoseRecord> {
    if let Err(err) = protocol.validate() {
        tracing::warn!(%err, "skipping invalid protocol");
        return Vec::new();
    }
    expand(protocol, &occupied_slots(existing), options.today)
}

/// Newly generated doses for every active protocol, sorted ascending by date
///
/// Archived protocols are ignored. Invalid protocols are logged and skipped without
/// affecting the rest. Slots already taken in `existing` are never emitted.
///
/// When two protocols for the same medication schedule the same date, the one that
/// starts later wins (ties broken by id), so a titration step handing over on its
/// stop date yields the next step's dose. The result does not depend on the order of
/// `protocols`.
pub fn project(
    protocols: &[DosingProtocol],
    existing: &[DoseRecord],
    options: &ProjectionOptions,
) -> Vec<DoseRecord> {
    let occupied = occupied_slots(existing);
    let mut active: Vec<&DosingProtocol> = Vec::with_capacity(protocols.len());
    for protocol in protocols {
        if protocol.is_archived() {
            tracing::debug!(protocol = protocol.id(), "skipping archived protocol");
            continue;
        }
        if let Err(err) = protocol.validate() {
            tracing::warn!(%err, "skipping invalid protocol");
            continue;
        }
        active.push(protocol);
    }
    active.sort_by(|a, b| precedence(a, b));

    let mut claimed: HashMap<Slot, DoseRecord> = HashMap::new();
    for protocol in active {
        for dose in expand(protocol, &occupied, options.today) {
            claimed.insert((dose.date(), dose.medication().to_string()), dose);
        }
    }
    let mut doses: Vec<DoseRecord> = claimed.into_values().collect();
    sort_doses(&mut doses);
    doses
}

/// Regenerate the full dose set from the complete current protocol list
///
/// Every protocol-generated record in `history` is discarded, manual records are kept,
/// and all active protocols are projected again on top of them. The result is the
/// complete merged set sorted ascending by date (ties by medication name), ready to be
/// persisted in place of the old history.
///
/// Generated doses are not tracked back to the protocol that produced them, so the
/// caller must always pass every current protocol, not just the ones that changed.
pub fn rebuild(
    protocols: &[DosingProtocol],
    history: &DoseHistory,
    options: &ProjectionOptions,
) -> Vec<DoseRecord> {
    let mut records: Vec<DoseRecord> = history.manual().cloned().collect();
    let generated = project(protocols, &records, options);
    tracing::debug!(
        manual = records.len(),
        generated = generated.len(),
        "rebuilt dose history"
    );
    records.extend(generated);
    sort_doses(&mut records);
    records
}

/// Check every active protocol up front
///
/// Returns all validation errors instead of stopping at the first one; an empty
/// vector means every active protocol can be projected.
pub fn validate_protocols(protocols: &[DosingProtocol]) -> Vec<ProtocolError> {
    protocols
        .iter()
        .filter(|p| !p.is_archived())
        .filter_map(|p| p.validate().err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builder::ProtocolBuilderExt;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(start: NaiveDate) -> DosingProtocol {
        DosingProtocol::builder("semaglutide", start)
            .id("sema")
            .dose(0.25)
            .weekly()
            .build()
            .unwrap()
    }

    #[test]
    fn test_weekly_dates_through_today() {
        let dates = schedule_dates(&weekly(date(2024, 1, 1)), date(2024, 1, 22));
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 1),
                date(2024, 1, 8),
                date(2024, 1, 15),
                date(2024, 1, 22)
            ]
        );
    }

    #[test]
    fn test_fractional_interval() {
        let protocol = DosingProtocol::builder("tirzepatide", date(2024, 1, 1))
            .dose(2.5)
            .times_per_week(2.0)
            .until(date(2024, 1, 15))
            .build()
            .unwrap();
        let dates = schedule_dates(&protocol, date(2024, 6, 1));
        // 0, 3.5, 7, 10.5, 14 days after the start
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 1),
                date(2024, 1, 4),
                date(2024, 1, 8),
                date(2024, 1, 11),
                date(2024, 1, 15)
            ]
        );
    }

    #[test]
    fn test_stop_date_bounds_ongoing_horizon() {
        let mut protocol = weekly(date(2024, 1, 1));
        protocol.set_stop_date(Some(date(2024, 1, 10)));
        let dates = schedule_dates(&protocol, date(2024, 12, 31));
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 8)]);
    }

    #[test]
    fn test_future_start_yields_nothing() {
        let dates = schedule_dates(&weekly(date(2024, 2, 1)), date(2024, 1, 22));
        assert!(dates.is_empty());
    }

    #[test]
    fn test_archived_protocol_is_skipped() {
        let mut protocol = weekly(date(2024, 1, 1));
        protocol.archive();
        let options = ProjectionOptions::new(date(2024, 1, 22));
        assert!(project(&[protocol], &[], &options).is_empty());
    }

    #[test]
    fn test_overlapping_protocols_share_slots() {
        let a = weekly(date(2024, 1, 1));
        let b = weekly(date(2024, 1, 8));
        let options = ProjectionOptions::new(date(2024, 1, 15));
        let doses = project(&[a, b], &[], &options);
        assert_eq!(doses.len(), 3);
    }

    #[test]
    fn test_handover_date_goes_to_later_step() {
        let step1 = DosingProtocol::builder("tirzepatide", date(2024, 1, 1))
            .id("step1")
            .dose(2.5)
            .weekly()
            .until(date(2024, 1, 29))
            .build()
            .unwrap();
        let step2 = DosingProtocol::builder("tirzepatide", date(2024, 1, 29))
            .id("step2")
            .dose(5.0)
            .weekly()
            .build()
            .unwrap();
        let options = ProjectionOptions::new(date(2024, 2, 12));

        let forward = project(&[step1.clone(), step2.clone()], &[], &options);
        let backward = project(&[step2, step1], &[], &options);
        assert_eq!(forward, backward);

        let handover = forward
            .iter()
            .find(|d| d.date() == date(2024, 1, 29))
            .unwrap();
        assert_eq!(handover.dose_amount(), 5.0);
        assert_eq!(forward.len(), 7);
    }

    #[test]
    fn test_sub_daily_interval_emits_each_date_once() {
        let protocol = DosingProtocol::builder("liraglutide", date(2024, 1, 1))
            .dose(0.6)
            .times_per_week(14.0)
            .until(date(2024, 1, 3))
            .build()
            .unwrap();
        let doses = project_protocol(&protocol, &[], &ProjectionOptions::new(date(2024, 1, 3)));
        assert_eq!(doses.len(), 3);
    }

    #[test]
    fn test_validate_protocols_collects_all_errors() {
        let mut bad_frequency = weekly(date(2024, 1, 1));
        bad_frequency.frequency_per_week = 0.0;
        let mut bad_dates = weekly(date(2024, 1, 1));
        bad_dates.stop_date = Some(date(2023, 12, 1));
        let mut archived = bad_frequency.clone();
        archived.archive();

        let errors = validate_protocols(&[
            weekly(date(2024, 1, 1)),
            bad_frequency,
            bad_dates,
            archived,
        ]);
        assert_eq!(errors.len(), 2);
    }
}
