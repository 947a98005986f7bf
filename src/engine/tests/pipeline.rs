use super::*;

const CPU_LABELS: [&str; 8] = [
    "user", "system", "idle", "iowait", "irq", "nice", "softirq", "steal",
];

fn cpu_all_samples(ticks: i64) -> Vec<Sample> {
    let mut samples = Vec::new();
    for tick in 0..ticks {
        for (offset, label) in (1i64..).zip(CPU_LABELS) {
            let per_second = offset as f64 / 36.0;
            samples.push(sample("cpu_all", label, tick, per_second * tick as f64));
        }
        samples.push(sample("cpu_all", "user0", tick, tick as f64));
    }
    samples
}

#[test]
fn cpu_all_family_yields_ordered_percentages() -> EngineResult<()> {
    let spec = FamilySpec::new("cpu_all", CPU_LABELS, MetricKind::Cumulative)
        .with_aggregation(Aggregation::Mean)
        .with_unit_scale(100.0)
        .with_column_order(CPU_LABELS, OrderPolicy::Strict);
    let output = process_family(&cpu_all_samples(15), &spec)?;

    if output.derived.kind() != MetricKind::Cumulative {
        return Err("Expected rate output".into());
    }
    let table = output.derived.table();
    if table.columns() != CPU_LABELS {
        return Err(EngineError::from(format!(
            "Unexpected columns: {:?}",
            table.columns()
        )));
    }
    if table.row_count() != 5 || output.aligned_rows != 15 || output.filtered_samples != 120 {
        return Err(EngineError::from(format!(
            "Unexpected counts: {} rows, {} aligned, {} filtered",
            table.row_count(),
            output.aligned_rows,
            output.filtered_samples
        )));
    }
    let steal = table.cell(0, "steal").ok_or("Missing steal rate")?;
    if !approx_eq(steal, 800.0 / 36.0) {
        return Err(EngineError::from(format!("Unexpected steal rate: {}", steal)));
    }
    Ok(())
}

#[test]
fn family_with_no_matching_samples_is_empty_input() -> EngineResult<()> {
    let spec = FamilySpec::new("network_tx", ["eth0"], MetricKind::Cumulative);
    match process_family(&cpu_all_samples(3), &spec) {
        Err(EngineError::EmptyInput { metric }) if metric == "network_tx" => Ok(()),
        other => Err(EngineError::from(format!("Expected EmptyInput, got {:?}", other))),
    }
}

#[test]
fn strict_order_failure_propagates_from_pipeline() -> EngineResult<()> {
    let spec = FamilySpec::new("cpu_all", ["user", "system"], MetricKind::Cumulative)
        .with_column_order(["user"], OrderPolicy::Strict);
    match process_family(&cpu_all_samples(3), &spec) {
        Err(EngineError::UnknownColumnInCanonicalOrder { label, .. }) if label == "system" => {
            Ok(())
        }
        other => Err(EngineError::from(format!(
            "Expected order error, got {:?}",
            other
        ))),
    }
}

#[test]
fn duration_family_averages_duplicates_then_scales() -> EngineResult<()> {
    let samples = vec![
        sample("backend_duration", "get", 0, 1_000_000_000.0),
        sample("backend_duration", "get", 0, 3_000_000_000.0),
        sample("backend_duration", "put", 1, 4_000_000_000.0),
        sample("backend_duration", "unknown", 1, 9.0),
    ];
    let spec = FamilySpec::new("backend_duration", ["get", "put", "close"], MetricKind::Instantaneous)
        .with_aggregation(Aggregation::Mean)
        .with_unit_scale(1e-9)
        .with_name("duration");
    let output = process_family(&samples, &spec)?;

    if output.name != "duration" || output.metric_name != "backend_duration" {
        return Err("Unexpected output identity".into());
    }
    let table = output.derived.table();
    if table.columns() != ["get", "put"] {
        return Err(EngineError::from(format!(
            "Unexpected columns: {:?}",
            table.columns()
        )));
    }
    let get = table.cell(1, "get").ok_or("Missing forward-filled get")?;
    if !approx_eq(get, 2.0) {
        return Err(EngineError::from(format!("Expected mean 2s, got {}", get)));
    }
    Ok(())
}
