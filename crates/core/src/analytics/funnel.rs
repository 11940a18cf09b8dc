//! Stage funnel with cumulative reach and step conversion

use dealscope_domain::{FunnelStep, PipelineSummary};

/// Turn stage rows into funnel steps.
///
/// `reached` counts deals at a stage or any later one, so it never grows
/// along the funnel. The unmapped row has no position in the funnel and is
/// left out.
pub fn build_funnel(summary: &PipelineSummary) -> Vec<FunnelStep> {
    let stages: Vec<_> = summary.by_stage.iter().filter(|m| !m.unmapped).collect();

    let mut reached = vec![0usize; stages.len()];
    let mut running = 0;
    for (idx, metric) in stages.iter().enumerate().rev() {
        running += metric.deal_count;
        reached[idx] = running;
    }

    stages
        .iter()
        .enumerate()
        .map(|(idx, metric)| {
            let conversion_pct = idx
                .checked_sub(1)
                .map(|prev| reached[prev])
                .filter(|&prev| prev > 0)
                .map(|prev| reached[idx] as f64 * 100.0 / prev as f64);

            FunnelStep {
                stage_id: metric.stage_id.clone(),
                label: metric.label.clone(),
                count: metric.deal_count,
                reached: reached[idx],
                conversion_pct,
            }
        })
        .collect()
}
