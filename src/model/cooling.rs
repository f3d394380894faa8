use crate::types::{CoolingCenter, Neighborhood};

pub const COOLING_CENTERS: [CoolingCenter; 5] = [
    CoolingCenter { name: "BCYF Tobin", address: "1481 Tremont St, Roxbury", neighborhood: Neighborhood::Roxbury, capacity: 150 },
    CoolingCenter { name: "BCYF Perkins", address: "155 Talbot Ave, Dorchester", neighborhood: Neighborhood::Dorchester, capacity: 100 },
    CoolingCenter { name: "BCYF Paris Street", address: "112 Paris St, East Boston", neighborhood: Neighborhood::EastBoston, capacity: 80 },
    CoolingCenter { name: "BCYF Quincy", address: "885 Washington St, Chinatown", neighborhood: Neighborhood::Chinatown, capacity: 120 },
    CoolingCenter { name: "Boston Public Library", address: "700 Boylston St, Back Bay", neighborhood: Neighborhood::BackBay, capacity: 500 },
];

pub fn centers_in(neighborhood: Neighborhood) -> impl Iterator<Item = &'static CoolingCenter> {
    COOLING_CENTERS.iter().filter(move |c| c.neighborhood == neighborhood)
}

pub fn total_capacity() -> u32 {
    COOLING_CENTERS.iter().map(|c| c.capacity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centers_by_neighborhood() {
        let chinatown: Vec<_> = centers_in(Neighborhood::Chinatown).collect();
        assert_eq!(chinatown.len(), 1);
        assert_eq!(chinatown[0].name, "BCYF Quincy");
        assert_eq!(centers_in(Neighborhood::Brighton).count(), 0);
    }

    #[test]
    fn test_total_capacity() {
        assert_eq!(total_capacity(), 950);
    }
}
