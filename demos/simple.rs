use grid_util::point::Point;
use sea_routing::chart::Chart;
use sea_routing::terrain::CellKind;

// In this example a single ship is routed around a reef line:
// S....
// .####
// .....
// ....P
// (shown on the top-left corner of a 40x40 chart)
fn main() {
    let mut chart = Chart::new(40).unwrap();
    chart.add_ship(Point::new(0, 0)).unwrap();
    chart.add_port(Point::new(4, 3)).unwrap();
    for x in 1..5 {
        chart.add_obstacle(Point::new(x, 1), CellKind::Reef).unwrap();
    }
    let plan = chart.plan().unwrap();
    for leg in &plan.legs {
        println!(
            "leg {} from ({}, {}) to ({}, {}) costs {:.2}:",
            leg.sequence, leg.ship.x, leg.ship.y, leg.port.x, leg.port.y, leg.cost
        );
        for p in &leg.route {
            println!("{:?}", p);
        }
    }
    println!("total cost {:.2}", plan.total_cost);
}
