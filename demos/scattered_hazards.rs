use grid_util::point::Point;
use rand::prelude::*;
use sea_routing::chart::Chart;
use sea_routing::terrain::CellKind;

// Scatters hazards over roughly 20% of the chart, then plans through the
// debris field. The library itself stays deterministic; randomness lives out
// here with the caller.
fn main() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut chart = Chart::new(80).unwrap();
    let hazard_count = chart.size() * chart.size() / 5;
    let mut placed = 0;
    while placed < hazard_count {
        let p = Point::new(
            rng.gen_range(0..chart.size() as i32),
            rng.gen_range(0..chart.size() as i32),
        );
        let kind = match rng.gen_range(0..3) {
            0 => CellKind::Island,
            1 => CellKind::Reef,
            _ => CellKind::Rock,
        };
        if chart.add_obstacle(p, kind).is_ok() {
            placed += 1;
        }
    }
    chart.clear_cell(Point::new(0, 0)).unwrap();
    chart.clear_cell(Point::new(79, 79)).unwrap();
    chart.add_ship(Point::new(0, 0)).unwrap();
    chart.add_port(Point::new(79, 79)).unwrap();
    match chart.plan() {
        Ok(plan) if !plan.legs.is_empty() => {
            println!(
                "crossed the field in {} cells at cost {:.2}",
                plan.legs[0].route.len(),
                plan.legs[0].cost
            );
        }
        Ok(_) => println!("the debris field separates ship and port"),
        Err(error) => println!("planning failed: {error}"),
    }
}
