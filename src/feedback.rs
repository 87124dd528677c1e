use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Audible feedback on boot and on every detected tag. Failures here are
/// logged and swallowed; a mute terminal still records attendance.
#[async_trait]
pub trait Buzzer: Send + Sync {
    async fn beep(&self, duration: Duration);
}

/// Buzzer wired to a sysfs GPIO value file.
pub struct GpioBuzzer {
    value_path: PathBuf,
}

impl GpioBuzzer {
    pub fn new(gpio: u32) -> Self {
        Self {
            value_path: PathBuf::from(format!("/sys/class/gpio/gpio{}/value", gpio)),
        }
    }

    async fn write(&self, level: &str) {
        if let Err(e) = tokio::fs::write(&self.value_path, level).await {
            warn!(error = %e, path = %self.value_path.display(), "buzzer write failed");
        }
    }
}

#[async_trait]
impl Buzzer for GpioBuzzer {
    async fn beep(&self, duration: Duration) {
        self.write("1").await;
        tokio::time::sleep(duration).await;
        self.write("0").await;
    }
}

/// Used when no buzzer GPIO is configured.
pub struct SilentBuzzer;

#[async_trait]
impl Buzzer for SilentBuzzer {
    async fn beep(&self, _duration: Duration) {}
}

/// Test buzzer that counts beeps.
#[cfg(test)]
pub struct CountingBuzzer(pub std::sync::Arc<std::sync::atomic::AtomicU32>);

#[cfg(test)]
#[async_trait]
impl Buzzer for CountingBuzzer {
    async fn beep(&self, _duration: Duration) {
        self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
