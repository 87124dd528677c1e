use crate::clock::LocalStamp;
use crate::model::attendance::{AttendanceRecord, NewArrival};
use crate::model::person::Person;
use crate::policy::{ArrivalStatus, AttendancePolicy};
use crate::store::{RecordStore, StoreError};
use tracing::info;

/// What a scan should do to today's record. Per (person, date) the record
/// moves NoRecord -> Arrived -> Departed and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    CreateArrival(ArrivalStatus),
    RecordDeparture { record_id: u64 },
    NoOp(NoOpReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Checked in, but the departure window hasn't opened yet.
    NotYetDeparture,
    /// Both check-in and check-out already recorded today.
    AlreadyComplete,
}

/// How a processed scan ended up, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    CheckedIn(ArrivalStatus),
    CheckedOut,
    /// Our create lost the race: the store's unique key already held a row.
    AlreadyCheckedIn,
    NotYetDeparture,
    AlreadyComplete,
}

/// Pure transition function. `existing` is whatever the store returned for
/// (person, today) immediately before — state is always re-derived from the
/// store, never remembered between scans.
pub fn decide(
    existing: Option<&AttendanceRecord>,
    stamp: &LocalStamp,
    policy: &AttendancePolicy,
) -> Decision {
    match existing {
        None => Decision::CreateArrival(policy.classify_arrival(stamp.day_seconds())),
        Some(record) if record.check_out.is_some() => Decision::NoOp(NoOpReason::AlreadyComplete),
        Some(record) if policy.is_departure_window(stamp.day_seconds()) => {
            Decision::RecordDeparture { record_id: record.id }
        }
        Some(_) => Decision::NoOp(NoOpReason::NotYetDeparture),
    }
}

/// Read today's record, decide, and perform the single write (if any).
/// A create rejected by the store's uniqueness key is not an error: someone
/// beat us to it, so the person is already checked in and the next tap will
/// see fresh state.
pub async fn reconcile<S: RecordStore>(
    store: &S,
    policy: &AttendancePolicy,
    person: &Person,
    stamp: LocalStamp,
) -> Result<Outcome, StoreError> {
    let existing = store.find_record(person.id, stamp.date).await?;

    match decide(existing.as_ref(), &stamp, policy) {
        Decision::CreateArrival(status) => {
            let arrival = NewArrival {
                person_id: person.id,
                date: stamp.date,
                check_in: stamp.time,
                status,
            };
            match store.create_arrival(&arrival).await {
                Ok(record) => {
                    info!(
                        person = %person.full_name,
                        record_id = record.id,
                        check_in = %stamp.time,
                        status = %status,
                        "checked in"
                    );
                    Ok(Outcome::CheckedIn(status))
                }
                Err(StoreError::Conflict) => {
                    info!(
                        person = %person.full_name,
                        date = %stamp.date,
                        "check-in raced another writer, already checked in today"
                    );
                    Ok(Outcome::AlreadyCheckedIn)
                }
                Err(e) => Err(e),
            }
        }
        Decision::RecordDeparture { record_id } => {
            store.patch_departure(record_id, stamp.time).await?;
            info!(
                person = %person.full_name,
                record_id,
                check_out = %stamp.time,
                "checked out"
            );
            Ok(Outcome::CheckedOut)
        }
        Decision::NoOp(NoOpReason::NotYetDeparture) => {
            info!(
                person = %person.full_name,
                "already checked in, not yet departure time"
            );
            Ok(Outcome::NotYetDeparture)
        }
        Decision::NoOp(NoOpReason::AlreadyComplete) => {
            info!(
                person = %person.full_name,
                "already checked in and out today"
            );
            Ok(Outcome::AlreadyComplete)
        }
    }
}
