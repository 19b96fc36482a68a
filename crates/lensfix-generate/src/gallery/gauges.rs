use async_trait::async_trait;
use lensfix_core::{ChartConfig, Dataset, GaugeConfig, GaugeShape};

use super::last;
use crate::errors::FixtureError;
use crate::registry::{ExampleGenerator, ExampleRegistry};
use crate::writer::FixtureWriter;

pub fn register(registry: &mut ExampleRegistry) {
    registry.register(Box::new(Gauge));
    registry.register(Box::new(GaugeCircle));
    registry.register(Box::new(GaugeHorizontalBullet));
    registry.register(Box::new(GaugeVerticalBullet));
}

/// Ratio gauges run 0..1 with a 0.8 goal.
const RATIO: (&str, &str) = ("1", "0.8");
/// Percentage gauges run 0..100 with an 80 goal.
const PERCENT: (&str, &str) = ("100", "80");
/// Uptime scores run 0..100 with a 95 goal.
const UPTIME: (&str, &str) = ("100", "95");

fn with_ranges(config: GaugeConfig, (max, goal): (&str, &str), shape: GaugeShape) -> ChartConfig {
    ChartConfig::Gauge(GaugeConfig {
        query_min_value: Some("0".to_string()),
        query_max_value: Some(max.to_string()),
        query_goal_value: Some(goal.to_string()),
        shape: Some(shape),
        ..config
    })
}

struct Gauge;

#[async_trait]
impl ExampleGenerator for Gauge {
    fn name(&self) -> &'static str {
        "gauge"
    }

    fn entry_point(&self) -> &'static str {
        "generateGauge"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_ranges(
            GaugeConfig::new(
                "CPU Usage Gauge",
                Dataset::esql("FROM metrics-* | STATS avg_cpu = AVG(system.cpu.total.pct)"),
                "avg_cpu",
            ),
            RATIO,
            GaugeShape::Arc,
        );
        let dataview = with_ranges(
            GaugeConfig::new(
                "CPU Usage Gauge (Data View)",
                Dataset::index("metrics-*"),
                "average(system.cpu.total.pct)",
            ),
            RATIO,
            GaugeShape::Arc,
        );

        writer
            .write_dual_fixture("gauge", &esql, &dataview, &last("15m"))
            .await?;
        Ok(())
    }
}

struct GaugeCircle;

#[async_trait]
impl ExampleGenerator for GaugeCircle {
    fn name(&self) -> &'static str {
        "gauge-circle"
    }

    fn entry_point(&self) -> &'static str {
        "generateGaugeCircle"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_ranges(
            GaugeConfig::new(
                "Memory Usage Gauge (Circle)",
                Dataset::esql("FROM metrics-* | STATS avg_mem = AVG(system.memory.used.pct)"),
                "avg_mem",
            ),
            RATIO,
            GaugeShape::Circle,
        );
        let dataview = with_ranges(
            GaugeConfig::new(
                "Memory Usage Gauge (Circle, Data View)",
                Dataset::index("metrics-*"),
                "average(system.memory.used.pct)",
            ),
            RATIO,
            GaugeShape::Circle,
        );

        writer
            .write_dual_fixture("gauge-circle", &esql, &dataview, &last("15m"))
            .await?;
        Ok(())
    }
}

struct GaugeHorizontalBullet;

#[async_trait]
impl ExampleGenerator for GaugeHorizontalBullet {
    fn name(&self) -> &'static str {
        "gauge-horizontal-bullet"
    }

    fn entry_point(&self) -> &'static str {
        "generateGaugeHorizontalBullet"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_ranges(
            GaugeConfig::new(
                "Disk Usage (Horizontal Bullet)",
                Dataset::esql("FROM metrics-* | STATS avg_disk = AVG(system.disk.used.pct) * 100"),
                "avg_disk",
            ),
            PERCENT,
            GaugeShape::HorizontalBullet,
        );
        let dataview = with_ranges(
            GaugeConfig::new(
                "Disk Usage (Horizontal Bullet, Data View)",
                Dataset::index("metrics-*"),
                "average(system.disk.used.pct) * 100",
            ),
            PERCENT,
            GaugeShape::HorizontalBullet,
        );

        writer
            .write_dual_fixture("gauge-horizontal-bullet", &esql, &dataview, &last("15m"))
            .await?;
        Ok(())
    }
}

struct GaugeVerticalBullet;

#[async_trait]
impl ExampleGenerator for GaugeVerticalBullet {
    fn name(&self) -> &'static str {
        "gauge-vertical-bullet"
    }

    fn entry_point(&self) -> &'static str {
        "generateGaugeVerticalBullet"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_ranges(
            GaugeConfig::new(
                "Uptime Score (Vertical Bullet)",
                Dataset::esql("FROM metrics-* | STATS uptime = AVG(system.uptime.pct) * 100"),
                "uptime",
            ),
            UPTIME,
            GaugeShape::VerticalBullet,
        );
        let dataview = with_ranges(
            GaugeConfig::new(
                "Uptime Score (Vertical Bullet, Data View)",
                Dataset::index("metrics-*"),
                "average(system.uptime.pct) * 100",
            ),
            UPTIME,
            GaugeShape::VerticalBullet,
        );

        writer
            .write_dual_fixture("gauge-vertical-bullet", &esql, &dataview, &last("15m"))
            .await?;
        Ok(())
    }
}
