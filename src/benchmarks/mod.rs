//! Criterion settings shared by the workspace benches.

#[cfg(feature = "benchmarks")]
pub mod config {
    use criterion::{
        measurement::WallTime, AxisScale, BenchmarkGroup, Criterion, PlotConfiguration,
    };
    #[cfg(not(target_os = "windows"))]
    use pprof::criterion::{Output, PProfProfiler};
    use std::time::Duration;

    #[cfg(not(target_os = "windows"))]
    pub fn get_default_profiling_configs() -> Criterion {
        Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
    }

    #[cfg(target_os = "windows")]
    pub fn get_default_profiling_configs() -> Criterion {
        Criterion::default()
    }

    /// Opens a group for full Lloyd runs. A run on a million points takes seconds, hence few
    /// samples and a long measurement window. Problem sizes grow geometrically so the summary
    /// plot is logarithmic.
    pub fn lloyd_benchmark_group<'a>(
        c: &'a mut Criterion,
        name: &str,
    ) -> BenchmarkGroup<'a, WallTime> {
        let mut group = c.benchmark_group(name);
        group
            .sample_size(10)
            .measurement_time(Duration::from_secs(20))
            .warm_up_time(Duration::from_secs(3))
            .confidence_level(0.95)
            .noise_threshold(0.05)
            .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
        group
    }
}
