use super::*;

fn user_counter(ticks: i64) -> EngineResult<AlignedTable> {
    let samples = linear_counter("cpu_all", "user", ticks, 1.0);
    aligned_from(&samples, "cpu_all", &["user"])
}

#[test]
fn cpu_seconds_at_one_second_ticks_give_unit_rate() -> EngineResult<()> {
    let aligned = user_counter(21)?;
    let rates = derive_rates(aligned.table(), window(10)?, 1.0, ResetPolicy::Skip);

    if rates.row_count() != 11 {
        return Err(EngineError::from(format!(
            "Expected 11 rows for ticks 0..=20, got {}",
            rates.row_count()
        )));
    }
    if rates.index().first() != Some(&Timestamp::from_secs(10)) {
        return Err(EngineError::from(format!(
            "Expected first row at tick 10, got {:?}",
            rates.index().first()
        )));
    }
    let column = rates.column("user").ok_or("Missing user column")?;
    if !column.iter().all(|rate| rate.is_some_and(|rate| approx_eq(rate, 1.0))) {
        return Err(EngineError::from(format!("Expected all 1.0, got {:?}", column)));
    }
    if rates.stats().warmup_rows != 10 {
        return Err(EngineError::from(format!(
            "Expected 10 warm-up rows, got {}",
            rates.stats().warmup_rows
        )));
    }

    let twenty = derive_rates(user_counter(20)?.table(), window(10)?, 1.0, ResetPolicy::Skip);
    if twenty.row_count() != 10 {
        return Err(EngineError::from(format!(
            "Expected 20 - 10 = 10 rows, got {}",
            twenty.row_count()
        )));
    }
    Ok(())
}

#[test]
fn percentage_scale_applies_after_the_divide() -> EngineResult<()> {
    let aligned = user_counter(21)?;
    let rates = derive_rates(aligned.table(), window(10)?, 100.0, ResetPolicy::Skip);
    let first = rates.cell(0, "user").ok_or("Missing first rate")?;
    if !approx_eq(first, 100.0) {
        return Err(EngineError::from(format!("Expected 100%, got {}", first)));
    }
    Ok(())
}

#[test]
fn linear_counter_rate_is_constant_for_any_window() -> EngineResult<()> {
    let per_second = 2.5;
    let samples: Vec<Sample> = (0..40i64)
        .map(|tick| {
            let nanos = tick * tick * 100_000_000;
            let secs = nanos as f64 / 1e9;
            Sample::new("c", "x", Timestamp::from_nanos(nanos), per_second * secs)
        })
        .collect();
    let aligned = aligned_from(&samples, "c", &["x"])?;

    for rows in [1usize, 2, 7, 10, 25] {
        let rates = derive_rates(aligned.table(), window(rows)?, 1.0, ResetPolicy::Skip);
        if rates.row_count() != 40 - rows {
            return Err(EngineError::from(format!(
                "Window {}: expected {} rows, got {}",
                rows,
                40 - rows,
                rates.row_count()
            )));
        }
        let column = rates.column("x").ok_or("Missing x column")?;
        for rate in column {
            let rate = rate.ok_or("Unexpected absent rate")?;
            if !approx_eq(rate, per_second) {
                return Err(EngineError::from(format!(
                    "Window {}: expected {}, got {}",
                    rows, per_second, rate
                )));
            }
        }
    }
    Ok(())
}

#[test]
fn shifting_every_timestamp_leaves_rates_unchanged() -> EngineResult<()> {
    let samples = vec![
        sample("c", "x", 0, 0.0),
        sample("c", "x", 1, 3.0),
        sample("c", "x", 3, 4.0),
        sample("c", "x", 4, 10.0),
        sample("c", "x", 7, 11.0),
        sample("c", "x", 8, 30.0),
    ];
    let offset = 1_700_000_000_123_456_789i64;
    let shifted: Vec<Sample> = samples
        .iter()
        .map(|original| {
            let mut moved = original.clone();
            moved.timestamp = original.timestamp.shifted_by_nanos(offset);
            moved
        })
        .collect();

    let base = derive_rates(
        aligned_from(&samples, "c", &["x"])?.table(),
        window(2)?,
        1.0,
        ResetPolicy::Keep,
    );
    let moved = derive_rates(
        aligned_from(&shifted, "c", &["x"])?.table(),
        window(2)?,
        1.0,
        ResetPolicy::Keep,
    );

    if base.row_count() != moved.row_count() {
        return Err(EngineError::from(format!(
            "Row count changed: {} vs {}",
            base.row_count(),
            moved.row_count()
        )));
    }
    let before = base.column("x").ok_or("Missing base column")?;
    let after = moved.column("x").ok_or("Missing shifted column")?;
    for (left, right) in before.iter().zip(after) {
        match (left, right) {
            (Some(left), Some(right)) if approx_eq(*left, *right) => {}
            _ => {
                return Err(EngineError::from(format!(
                    "Rates differ after shift: {:?} vs {:?}",
                    left, right
                )));
            }
        }
    }
    Ok(())
}

#[test]
fn non_positive_time_deltas_never_reach_the_output() -> EngineResult<()> {
    let index = vec![
        Timestamp::from_secs(0),
        Timestamp::from_secs(1),
        Timestamp::from_secs(1),
        Timestamp::from_secs(3),
        Timestamp::from_secs(2),
        Timestamp::from_secs(5),
    ];
    let values = vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
    let table = Table::from_columns(index, vec!["x".to_owned()], vec![values])?;

    let rates = derive_rates(&table, window(1)?, 1.0, ResetPolicy::Keep);
    if rates.stats().degenerate_windows != 2 {
        return Err(EngineError::from(format!(
            "Expected 2 degenerate windows, got {}",
            rates.stats().degenerate_windows
        )));
    }
    let kept: Vec<Timestamp> = rates.index().to_vec();
    let expected = vec![
        Timestamp::from_secs(1),
        Timestamp::from_secs(3),
        Timestamp::from_secs(5),
    ];
    if kept != expected {
        return Err(EngineError::from(format!("Unexpected rows: {:?}", kept)));
    }
    let column = rates.column("x").ok_or("Missing x column")?;
    if column.iter().any(|rate| rate.is_none_or(|rate| !rate.is_finite())) {
        return Err(EngineError::from(format!("Non-finite rate in {:?}", column)));
    }
    Ok(())
}

#[test]
fn counter_reset_is_skipped_or_kept_by_policy() -> EngineResult<()> {
    let samples: Vec<Sample> = [0.0, 10.0, 20.0, 5.0, 15.0]
        .iter()
        .zip(0i64..)
        .map(|(value, tick)| sample("c", "x", tick, *value))
        .collect();
    let aligned = aligned_from(&samples, "c", &["x"])?;

    let skipped = derive_rates(aligned.table(), window(1)?, 1.0, ResetPolicy::Skip);
    if skipped.row_count() != 3
        || skipped.stats().counter_resets != 1
        || skipped.stats().incomplete_rows != 1
    {
        return Err(EngineError::from(format!(
            "Unexpected skip result: {} rows, {:?}",
            skipped.row_count(),
            skipped.stats()
        )));
    }
    if skipped.column("x").is_some_and(|column| column.iter().flatten().any(|rate| *rate < 0.0)) {
        return Err("Skip policy produced a negative rate".into());
    }

    let kept = derive_rates(aligned.table(), window(1)?, 1.0, ResetPolicy::Keep);
    if kept.row_count() != 4 || kept.stats().counter_resets != 0 {
        return Err(EngineError::from(format!(
            "Unexpected keep result: {} rows, {:?}",
            kept.row_count(),
            kept.stats()
        )));
    }
    let reset = kept.cell(2, "x").ok_or("Missing reset row")?;
    if !approx_eq(reset, -15.0) {
        return Err(EngineError::from(format!("Expected -15, got {}", reset)));
    }
    Ok(())
}

#[test]
fn rows_with_a_late_column_are_trimmed() -> EngineResult<()> {
    let mut samples = linear_counter("c", "early", 6, 1.0);
    samples.extend((3..6).map(|tick| sample("c", "late", tick, 2.0 * tick as f64)));
    let aligned = aligned_from(&samples, "c", &["early", "late"])?;

    let rates = derive_rates(aligned.table(), window(1)?, 1.0, ResetPolicy::Skip);
    if rates.index() != [Timestamp::from_secs(4), Timestamp::from_secs(5)] {
        return Err(EngineError::from(format!(
            "Unexpected rows: {:?}",
            rates.index()
        )));
    }
    if rates.stats().incomplete_rows != 3 {
        return Err(EngineError::from(format!(
            "Expected 3 incomplete rows, got {}",
            rates.stats().incomplete_rows
        )));
    }
    Ok(())
}

#[test]
fn window_longer_than_table_yields_empty_rates() -> EngineResult<()> {
    let rates = derive_rates(user_counter(5)?.table(), window(10)?, 1.0, ResetPolicy::Skip);
    if !rates.is_empty() || rates.stats().warmup_rows != 5 {
        return Err(EngineError::from(format!(
            "Expected empty table with 5 warm-up rows, got {} rows, {:?}",
            rates.row_count(),
            rates.stats()
        )));
    }
    if rates.columns() != ["user"] {
        return Err("Columns must survive an empty derivation".into());
    }
    Ok(())
}

#[test]
fn instantaneous_measures_are_only_scaled() -> EngineResult<()> {
    let samples = vec![
        sample("backend_duration", "get", 0, 2_000_000_000.0),
        sample("backend_duration", "get", 1, 500_000_000.0),
        sample("backend_duration", "put", 1, 1_000_000_000.0),
    ];
    let aligned = aligned_from(&samples, "backend_duration", &["get", "put"])?;
    let options = DeriveOptions {
        kind: MetricKind::Instantaneous,
        unit_scale: 1e-9,
        ..DeriveOptions::default()
    };
    let derived = derive(aligned, &options);

    if derived.kind() != MetricKind::Instantaneous || derived.table().row_count() != 2 {
        return Err("Instantaneous output must keep every aligned row".into());
    }
    let get = derived.table().column("get").ok_or("Missing get column")?;
    let put = derived.table().column("put").ok_or("Missing put column")?;
    let get_ok = matches!(get, [Some(first), Some(second)] if approx_eq(*first, 2.0) && approx_eq(*second, 0.5));
    let put_ok = matches!(put, [None, Some(value)] if approx_eq(*value, 1.0));
    if !get_ok || !put_ok {
        return Err(EngineError::from(format!(
            "Unexpected scaled columns: {:?} {:?}",
            get, put
        )));
    }
    if derived.stats() != DeriveStats::default() {
        return Err("Instantaneous output must not report dropped rows".into());
    }
    Ok(())
}
