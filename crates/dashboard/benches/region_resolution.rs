//! Region resolution benchmark.
//!
//! Cardinality is tens of widgets in practice; this mostly guards against
//! accidental quadratic behavior in the resolution path.

use criterion::{criterion_group, criterion_main, Criterion};

use fruition_dashboard::{DashboardRegistry, Layout, LayoutId, Region, RegionId, Widget, WidgetId};

fn populated_registry(widgets: usize) -> DashboardRegistry {
    let registry = DashboardRegistry::new();
    let mut ids = Vec::with_capacity(widgets);
    for i in 0..widgets {
        let id = format!("widget-{i}");
        registry.register_widget(Widget::new(id.clone(), "BenchComponent", "Bench"));
        ids.push(WidgetId::new(id));
    }
    // Every third id is left unresolved to exercise the filtering path.
    let mut referenced = ids.clone();
    for i in 0..widgets / 3 {
        referenced[i * 3] = WidgetId::new(format!("missing-{i}"));
    }
    registry.register_layout(Layout::new(
        "bench-layout",
        "Bench",
        vec![Region::new("main", referenced)],
    ));
    registry.set_current_layout(LayoutId::new("bench-layout"));
    registry
}

fn bench_widgets_by_region(c: &mut Criterion) {
    let registry = populated_registry(64);
    let main = RegionId::new("main");

    c.bench_function("widgets_by_region_64", |b| {
        b.iter(|| registry.widgets_by_region(&main))
    });
}

criterion_group!(benches, bench_widgets_by_region);
criterion_main!(benches);
