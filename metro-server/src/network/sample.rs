//! Built-in sample network: part of the Hyderabad metro.

use crate::domain::DomainError;

use super::{Network, NetworkBuilder};

/// Fare charged per kilometre on the sample network, in rupees.
pub const FARE_PER_KM: f64 = 2.5;

/// Orange and Green line stops around the Bharat Nagar / Ameerpet
/// interchange, as (name, line, (lat, lon)).
pub const STOPS: &[(&str, &str, (f64, f64))] = &[
    ("Miyapur", "Orange", (17.4840, 78.3712)),
    ("JNTU", "Orange", (17.4624, 78.3802)),
    ("KPHB", "Orange", (17.4580, 78.3780)),
    ("Kukatpally", "Orange", (17.4495, 78.3884)),
    ("Bal Nagar", "Orange", (17.4387, 78.3970)),
    ("Moosapet", "Orange", (17.4259, 78.4120)),
    ("Bharat Nagar", "Orange", (17.4203, 78.4284)),
    ("Ameerpet", "Green", (17.4376, 78.4481)),
    ("Begumpet", "Green", (17.4470, 78.4678)),
    ("Secunderabad", "Green", (17.4399, 78.4983)),
    ("Paradise", "Green", (17.4066, 78.4744)),
    ("Charminar", "Green", (17.3616, 78.4747)),
];

/// Sample connections as (from, to, km, minutes).
///
/// Bharat Nagar and Ameerpet are joined twice: once by the running line and
/// once by a short transfer link.
pub const CONNECTIONS: &[(&str, &str, f64, f64)] = &[
    ("Miyapur", "JNTU", 3.5, 5.0),
    ("JNTU", "KPHB", 2.0, 3.0),
    ("KPHB", "Kukatpally", 2.2, 3.0),
    ("Kukatpally", "Bal Nagar", 2.0, 3.0),
    ("Bal Nagar", "Moosapet", 3.0, 4.0),
    ("Moosapet", "Bharat Nagar", 2.5, 4.0),
    ("Bharat Nagar", "Ameerpet", 5.0, 7.0),
    ("Ameerpet", "Begumpet", 3.0, 4.0),
    ("Begumpet", "Secunderabad", 4.0, 5.0),
    ("Secunderabad", "Paradise", 3.0, 4.0),
    ("Paradise", "Charminar", 6.0, 8.0),
    // Transfer link
    ("Bharat Nagar", "Ameerpet", 0.5, 5.0),
];

/// Build the sample network.
pub fn hyderabad_metro() -> Result<Network, DomainError> {
    let builder = STOPS
        .iter()
        .fold(NetworkBuilder::new(), |b, &(name, line, pos)| {
            b.stop(name, line, pos)
        });
    CONNECTIONS
        .iter()
        .fold(builder, |b, &(from, to, km, mins)| {
            b.connection(from, to, km, mins)
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_network_shape() {
        let net = hyderabad_metro().unwrap();
        assert_eq!(net.stop_count(), 12);
        assert_eq!(net.connection_count(), 12);
        assert_eq!(net.connections_between("Bharat Nagar", "Ameerpet").len(), 2);
        assert_eq!(net.describe_stop("Charminar").unwrap().line, "Green");
    }

    #[test]
    fn every_stop_is_connected() {
        let net = hyderabad_metro().unwrap();
        for stop in net.stops() {
            assert!(
                !net.neighbors(stop.id.as_str()).is_empty(),
                "{} has no neighbours",
                stop.id
            );
        }
    }
}
