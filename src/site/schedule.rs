//! Touring schedule shown in the "where to see us" section.

pub struct TourDate {
    pub id: u32,
    pub city: &'static str,
    pub venue: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub price: &'static str,
    pub available: bool,
}

pub const TOUR: [TourDate; 5] = [
    TourDate { id: 1, city: "Moscow", venue: "Theatre of Magic and Illusion", date: "15 February 2025", time: "19:00", price: "from 2500₽", available: true },
    TourDate { id: 2, city: "Saint Petersburg", venue: "Palace of Culture", date: "22 February 2025", time: "18:30", price: "from 2200₽", available: true },
    TourDate { id: 3, city: "Kazan", venue: "Centre for Contemporary Art", date: "1 March 2025", time: "19:30", price: "from 1800₽", available: true },
    TourDate { id: 4, city: "Yekaterinburg", venue: "Theatre Centre", date: "8 March 2025", time: "19:00", price: "from 2000₽", available: true },
    TourDate { id: 5, city: "Novosibirsk", venue: "Sovremennik House of Culture", date: "15 March 2025", time: "18:00", price: "from 1900₽", available: false },
];

/// Dates that can still be booked.
pub fn bookable() -> impl Iterator<Item = &'static TourDate> {
    TOUR.iter().filter(|t| t.available)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_out_dates_are_not_bookable() {
        assert_eq!(bookable().count(), 4);
        assert!(bookable().all(|t| t.id != 5));
        assert!(!TOUR[4].available);
    }
}
