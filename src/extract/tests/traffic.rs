use crate::extract::tests::utils::{lines, patterns};
use crate::extract::traffic::extract_traffic;

#[test]
fn test_traffic_line_styles() {
    let doc = lines("ORBI Arrivals: 45, Departures: 50\nErbil (ORER) Arr 15 Dep 17\nORSU arr=3");
    let traffic = extract_traffic(&doc, &patterns());

    let rows: Vec<(&str, u32, u32)> = traffic
        .iter()
        .map(|t| (t.airport.as_str(), t.arrivals, t.departures))
        .collect();
    assert_eq!(rows, vec![("ORBI", 45, 50), ("ORER", 15, 17), ("ORSU", 3, 0)]);
}

#[test]
fn test_counts_summed_per_airport() {
    let doc = lines("ORBI Arrivals: 10\nORBI Departures: 12\nORBI Arr 5 Dep 1");
    let traffic = extract_traffic(&doc, &patterns());
    assert_eq!(traffic.len(), 1);
    assert_eq!((traffic[0].arrivals, traffic[0].departures), (15, 13));
    assert_eq!(traffic[0].total(), 28);
}

#[test]
fn test_lines_without_counts_or_airport_ignored() {
    let doc = lines("ORBI/BGW\nA1234/25 – RWY closed.\nArrivals: 40\nDeparture gate change at ORBI");
    assert!(extract_traffic(&doc, &patterns()).is_empty());
}

#[test]
fn test_large_counts_saturate() {
    let doc = lines("ORBI Arrivals: 4000000000\nORBI Arrivals: 4000000000 Departures: 1");
    let traffic = extract_traffic(&doc, &patterns());
    assert_eq!(traffic[0].arrivals, u32::MAX);
    assert_eq!(traffic[0].total(), u32::MAX);
}
