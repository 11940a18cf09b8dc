//! Integration tests for domain configuration and CRM projection types
//!
//! Covers the config shapes operators actually write and the serialized
//! form of the types that reach presentation code.

use dealscope_domain::{
    BoxStyle, Config, DateBasis, EnrichedDeal, EnrichedLineItem, LineItem, MarketBand,
    StageRef, TimeGranularity,
};

// ============================================================================
// Config
// ============================================================================

#[test]
fn toml_config_overrides_bands_and_report_settings() {
    let toml_content = r#"
[hubspot]
access_token = "pat-na1-abc"
pipeline_id = "corrugated"

[report]
timezone = "America/Argentina/Cordoba"
granularity = "month"
basis = "closed"

[market.default_band]
min = 500.0
max = 700.0
avg = 600.0

[market.bands.amba]
min = 560.0
max = 760.0
avg = 660.0
"#;

    let config: Config = toml::from_str(toml_content).expect("valid TOML config");
    config.validate().expect("config should validate");

    assert_eq!(config.hubspot.pipeline_id, "corrugated");
    assert_eq!(config.report.granularity, TimeGranularity::Month);
    assert_eq!(config.report.basis, DateBasis::Closed);
    // A bands table in the file replaces the built-in table
    assert_eq!(config.market.bands.len(), 1);
    assert_eq!(config.market.bands["amba"], MarketBand::new(560.0, 760.0, 660.0));
    assert_eq!(config.market.default_band.avg, 600.0);
}

#[test]
fn empty_config_file_is_all_defaults() {
    let config: Config = toml::from_str("").expect("empty TOML is valid");
    assert_eq!(config, Config::default());
}

// ============================================================================
// Enriched deal serialization
// ============================================================================

fn sample_enriched_deal(avg: Option<f64>) -> EnrichedDeal {
    EnrichedDeal {
        id: "901".into(),
        name: "Cajas exportación".into(),
        amount: 10_000.0,
        pipeline_id: "default".into(),
        stage: StageRef { id: "qualified".into(), label: "Qualified".into(), resolved: true },
        created_at: None,
        closed_at: None,
        contact_ids: vec!["51".into()],
        company_id: Some("77".into()),
        company_name: Some("Frigorífico Sur".into()),
        zone: Some("amba".into()),
        line_items: vec![EnrichedLineItem {
            item: LineItem {
                id: "li-1".into(),
                deal_id: "901".into(),
                name: "RSC 400x300x150".into(),
                quantity: 100.0,
                length_mm: 400.0,
                width_mm: 300.0,
                height_mm: 150.0,
                box_style: None,
                unit_price: 100.0,
                amount: 10_000.0,
                tax_amount: 2_100.0,
            },
            style: BoxStyle::SimpleFlap,
            unit_area_m2: 0.648,
            total_area_m2: 64.8,
        }],
        total_area_m2: 64.8,
        avg_price_per_area: avg,
        subtotal: 10_000.0,
        tax_total: 2_100.0,
        days_since_creation: 3,
    }
}

#[test]
fn missing_average_serializes_as_null_not_zero() {
    let json = serde_json::to_value(sample_enriched_deal(None)).expect("serializable");
    assert!(json["avg_price_per_area"].is_null());
}

#[test]
fn line_item_fields_are_flattened() {
    let json = serde_json::to_value(sample_enriched_deal(Some(154.32))).expect("serializable");
    let item = &json["line_items"][0];
    assert_eq!(item["id"], "li-1");
    assert_eq!(item["style"], "simple_flap");
    assert_eq!(item["unit_area_m2"], 0.648);
}
