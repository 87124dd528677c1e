use crate::clock::Clock;
use crate::engine;
use crate::feedback::Buzzer;
use crate::model::scan::RawUid;
use crate::policy::AttendancePolicy;
use crate::reader::TagReader;
use crate::resolver;
use crate::store::RecordStore;
use std::time::Duration;
use tracing::{error, info, warn};

const BOOT_BEEP: Duration = Duration::from_millis(200);
const TAP_BEEP: Duration = Duration::from_millis(100);

/// The polling driver. One tap is fully processed (publish -> resolve ->
/// reconcile) before the next read is issued; nothing that happens to a
/// single tap may take the loop down.
pub struct Terminal<S, R, C> {
    store: S,
    reader: R,
    clock: C,
    buzzer: Box<dyn Buzzer>,
    policy: AttendancePolicy,
    debounce: Duration,
}

impl<S, R, C> Terminal<S, R, C>
where
    S: RecordStore,
    R: TagReader,
    C: Clock,
{
    pub fn new(
        store: S,
        reader: R,
        clock: C,
        buzzer: Box<dyn Buzzer>,
        policy: AttendancePolicy,
        debounce: Duration,
    ) -> Self {
        Self {
            store,
            reader,
            clock,
            buzzer,
            policy,
            debounce,
        }
    }

    pub async fn run(&mut self) {
        self.buzzer.beep(BOOT_BEEP).await;
        info!("attendance terminal ready, waiting for badge taps");

        loop {
            let uid = match self.reader.next_tag().await {
                Ok(Some(uid)) => uid,
                Ok(None) => {
                    info!("badge reader stream ended, shutting down");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "badge reader read failed");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };

            self.handle_tap(uid).await;

            // let the card leave the reader before accepting the next tap
            tokio::time::sleep(self.debounce).await;
        }
    }

    async fn handle_tap(&self, uid: RawUid) {
        info!(%uid, "badge detected");
        self.buzzer.beep(TAP_BEEP).await;

        // live feed first, independent of whether the badge resolves
        if let Err(e) = self.store.publish_scan(&uid).await {
            warn!(error = %e, %uid, "live scan publish failed");
        }

        let person = match resolver::resolve(&self.store, &uid).await {
            Ok(Some(person)) => person,
            Ok(None) => {
                warn!(%uid, "badge not registered, attendance skipped");
                return;
            }
            Err(e) => {
                error!(error = %e, %uid, "person lookup failed, tap abandoned");
                return;
            }
        };

        let stamp = self.clock.now_local();
        if let Err(e) = engine::reconcile(&self.store, &self.policy, &person, stamp).await {
            error!(
                error = %e,
                person_id = person.id,
                date = %stamp.date,
                "attendance update failed, tap abandoned"
            );
        }
    }
}
