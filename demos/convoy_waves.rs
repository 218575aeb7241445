use grid_util::point::Point;
use sea_routing::chart::Chart;
use sea_routing::cost::Weather;

// Two ships and four ports: the ports claimed in wave one become origins for
// wave two, and a closing leg returns to the first ship's origin.
fn main() {
    let mut chart = Chart::new(60).unwrap();
    chart.set_weather(Weather::Rain);
    chart.add_ship(Point::new(2, 2)).unwrap();
    chart.add_ship(Point::new(50, 4)).unwrap();
    for port in [
        Point::new(10, 12),
        Point::new(45, 20),
        Point::new(30, 40),
        Point::new(5, 50),
    ] {
        chart.add_port(port).unwrap();
    }
    let plan = chart.plan().unwrap();
    for leg in &plan.legs {
        println!(
            "leg {}: ({}, {}) -> ({}, {}), {} cells, cost {:.2}",
            leg.sequence,
            leg.ship.x,
            leg.ship.y,
            leg.port.x,
            leg.port.y,
            leg.route.len(),
            leg.cost
        );
    }
    match chart.return_leg().unwrap() {
        Some(return_leg) => {
            let plan = plan.with_return_leg(return_leg);
            let home = plan.return_leg.as_ref().unwrap();
            println!("return leg over {} cells, cost {:.2}", home.route.len(), home.cost);
            println!("total with return {:.2}", plan.total_with_return.unwrap());
        }
        None => println!("no return leg exists"),
    }
}
