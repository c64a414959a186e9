use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub rider_operations_total: IntCounterVec,
    pub nearby_search_latency_seconds: Histogram,
    pub nearby_search_matches: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let rider_operations_total = IntCounterVec::new(
            Opts::new(
                "rider_operations_total",
                "Total rider service operations by operation and outcome",
            ),
            &["operation", "outcome"],
        )
        .expect("valid rider_operations_total metric");

        let nearby_search_latency_seconds = Histogram::with_opts(HistogramOpts::new(
            "nearby_search_latency_seconds",
            "Latency of nearby rider searches in seconds",
        ))
        .expect("valid nearby_search_latency_seconds metric");

        let nearby_search_matches = IntGauge::new(
            "nearby_search_matches",
            "Number of riders matched by the most recent nearby search",
        )
        .expect("valid nearby_search_matches metric");

        registry
            .register(Box::new(rider_operations_total.clone()))
            .expect("register rider_operations_total");
        registry
            .register(Box::new(nearby_search_latency_seconds.clone()))
            .expect("register nearby_search_latency_seconds");
        registry
            .register(Box::new(nearby_search_matches.clone()))
            .expect("register nearby_search_matches");

        Self {
            registry,
            rider_operations_total,
            nearby_search_latency_seconds,
            nearby_search_matches,
        }
    }

    pub fn record<T, E>(&self, operation: &str, result: &Result<T, E>) {
        let outcome = if result.is_ok() { "success" } else { "error" };
        self.rider_operations_total
            .with_label_values(&[operation, outcome])
            .inc();
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Metrics;

    #[test]
    fn record_counts_by_outcome() {
        let metrics = Metrics::new();
        metrics.record::<(), ()>("create_rider", &Ok(()));
        metrics.record::<(), ()>("create_rider", &Err(()));
        metrics.record::<(), ()>("create_rider", &Ok(()));

        let counter = &metrics.rider_operations_total;
        assert_eq!(counter.with_label_values(&["create_rider", "success"]).get(), 2);
        assert_eq!(counter.with_label_values(&["create_rider", "error"]).get(), 1);
    }

    #[test]
    fn encode_includes_registered_metrics() {
        let metrics = Metrics::new();
        metrics.nearby_search_matches.set(3);

        let body = metrics.encode().unwrap();
        assert!(body.contains("nearby_search_matches 3"));
    }
}
