use std::time::Instant;

///
/// A timed region, logged at `info` on drop. Modeled on the timing concept
/// in the teacher's workunit machinery, but without an async task-local
/// executor behind it: this crate has no async runtime to hook into, so a
/// plain RAII guard over `Instant` does the job.
///
pub(crate) struct Region {
    name: &'static str,
    start: Instant,
}

impl Region {
    pub(crate) fn start(name: &'static str) -> Region {
        log::debug!("{name} starting");
        Region {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        log::info!("{} finished in {:?}", self.name, self.start.elapsed());
    }
}
