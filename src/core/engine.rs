use crate::core::Pipeline;
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::monitor::SystemMonitor;

pub struct PatchEngine<P: Pipeline> {
    pipeline: P,
    #[cfg(feature = "cli")]
    monitor: SystemMonitor,
}

impl<P: Pipeline> PatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            #[cfg(feature = "cli")]
            monitor: SystemMonitor::new(false),
        }
    }

    #[cfg(feature = "cli")]
    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Drives the extract → transform → load stages in order and returns the
    /// path of the patched file.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting patch process");

        tracing::info!("Reading target file");
        let document = self.pipeline.extract().await?;
        tracing::info!("Read {} bytes", document.content.len());

        tracing::info!("Applying literal substitution");
        let result = self.pipeline.transform(document).await?;
        if result.occurrences == 0 {
            tracing::warn!("Search text not found, content left unchanged");
        } else {
            tracing::info!("Replaced {} occurrence(s)", result.occurrences);
        }

        tracing::info!("Writing content back");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Patched file: {}", output_path);

        #[cfg(feature = "cli")]
        if let Some(stats) = self.monitor.stats() {
            tracing::info!(
                "Run stats: {:.2}s elapsed, {} MB memory, {:.1}% CPU",
                stats.elapsed_time.as_secs_f64(),
                stats.memory_usage_mb,
                stats.cpu_usage
            );
        }

        Ok(output_path)
    }
}
