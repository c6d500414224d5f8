//! Seat booking: show list → seat map → checkout.
//!
//! Shows are compiled in. Seat maps are regenerated with fresh random
//! availability every time a show is picked and are never persisted.
//! Payment is simulated and always succeeds.

use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub struct Show {
    pub id: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub available_seats: u32,
    pub total_seats: u32,
    pub price: u32,
    pub vip_price: u32,
}

pub const SHOWS: [Show; 7] = [
    Show { id: "1", date: "2024-12-20", time: "19:00", available_seats: 45, total_seats: 200, price: 1500, vip_price: 2500 },
    Show { id: "2", date: "2024-12-21", time: "16:00", available_seats: 32, total_seats: 200, price: 1500, vip_price: 2500 },
    Show { id: "3", date: "2024-12-21", time: "19:00", available_seats: 18, total_seats: 200, price: 1500, vip_price: 2500 },
    Show { id: "4", date: "2024-12-22", time: "15:00", available_seats: 67, total_seats: 200, price: 1500, vip_price: 2500 },
    Show { id: "5", date: "2024-12-27", time: "19:00", available_seats: 89, total_seats: 200, price: 1800, vip_price: 2800 },
    Show { id: "6", date: "2024-12-28", time: "16:00", available_seats: 23, total_seats: 200, price: 1800, vip_price: 2800 },
    Show { id: "7", date: "2024-12-28", time: "19:00", available_seats: 12, total_seats: 200, price: 1800, vip_price: 2800 },
];

pub fn find_show(id: &str) -> Option<&'static Show> {
    SHOWS.iter().find(|s| s.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Plenty,
    Few,
    AlmostSoldOut,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Availability::Plenty => "Plenty of seats",
            Availability::Few => "Few seats left",
            Availability::AlmostSoldOut => "Almost sold out",
        }
    }
}

impl Show {
    pub fn availability(&self) -> Availability {
        match self.available_seats {
            n if n > 50 => Availability::Plenty,
            n if n > 20 => Availability::Few,
            _ => Availability::AlmostSoldOut,
        }
    }
}

pub const ROWS: u8 = 10;
pub const SEATS_PER_ROW: u8 = 20;
/// Rows `1..=VIP_ROWS` are VIP.
pub const VIP_ROWS: u8 = 3;
const VIP_AVAILABILITY: f64 = 0.7;
const REGULAR_AVAILABILITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatClass {
    Regular,
    Vip,
}

impl SeatClass {
    pub fn label(self) -> &'static str {
        match self {
            SeatClass::Regular => "Regular",
            SeatClass::Vip => "VIP",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    /// `<show>-<row>-<number>`
    pub id: String,
    pub row: u8,
    pub number: u8,
    pub class: SeatClass,
    pub available: bool,
    pub price: u32,
}

impl Seat {
    pub fn descriptor(&self) -> String {
        format!("Row {}, Seat {} ({})", self.row, self.number, self.class.label())
    }
}

/// Build a fresh seat map for `show`, rolling availability per seat.
pub fn generate_seats<R: Rng>(show: &Show, rng: &mut R) -> Vec<Seat> {
    let mut seats = Vec::with_capacity(ROWS as usize * SEATS_PER_ROW as usize);
    for row in 1..=ROWS {
        let (class, price, odds) = if row <= VIP_ROWS {
            (SeatClass::Vip, show.vip_price, VIP_AVAILABILITY)
        } else {
            (SeatClass::Regular, show.price, REGULAR_AVAILABILITY)
        };
        for number in 1..=SEATS_PER_ROW {
            seats.push(Seat {
                id: format!("{}-{}-{}", show.id, row, number),
                row,
                number,
                class,
                available: rng.gen_bool(odds),
                price,
            });
        }
    }
    seats
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub show_id: String,
    pub seat_id: String,
    pub seat_info: String,
    pub price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStep {
    #[default]
    Shows,
    Seats,
    Checkout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatToggle {
    Added,
    Removed,
    /// Taken seats ignore clicks.
    Inert,
}

/// What a completed (simulated) payment covered.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub show_id: Option<String>,
    pub seats: Vec<String>,
    pub total: u32,
}

pub struct Booking<R> {
    step: BookingStep,
    show: Option<&'static Show>,
    seats: Vec<Seat>,
    cart: Vec<CartItem>,
    processing: bool,
    rng: R,
}

impl<R: Rng> Booking<R> {
    pub fn new(rng: R) -> Self {
        Self {
            step: BookingStep::Shows,
            show: None,
            seats: Vec::new(),
            cart: Vec::new(),
            processing: false,
            rng,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn show(&self) -> Option<&'static Show> {
        self.show
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn is_in_cart(&self, seat_id: &str) -> bool {
        self.cart.iter().any(|item| item.seat_id == seat_id)
    }

    /// Sum of the current cart, recomputed on every call.
    pub fn total(&self) -> u32 {
        self.cart.iter().map(|item| item.price).sum()
    }

    /// `shows → seats`. The cart is left alone.
    pub fn select_show(&mut self, id: &str) -> Result<&'static Show> {
        if self.step != BookingStep::Shows {
            return Err(Error::InvalidStep);
        }
        let show = find_show(id).ok_or_else(|| Error::UnknownShow(id.to_string()))?;
        self.seats = generate_seats(show, &mut self.rng);
        self.show = Some(show);
        self.step = BookingStep::Seats;
        debug!(show = show.id, "seat map generated");
        Ok(show)
    }

    /// Add an available seat to the cart, or take it back out.
    pub fn toggle_seat(&mut self, seat_id: &str) -> Result<SeatToggle> {
        if self.step != BookingStep::Seats {
            return Err(Error::InvalidStep);
        }
        let show = self.show.ok_or(Error::InvalidStep)?;
        let seat = self
            .seats
            .iter()
            .find(|s| s.id == seat_id)
            .ok_or_else(|| Error::UnknownSeat(seat_id.to_string()))?;
        if !seat.available {
            return Ok(SeatToggle::Inert);
        }

        if let Some(pos) = self.cart.iter().position(|item| item.seat_id == seat_id) {
            self.cart.remove(pos);
            return Ok(SeatToggle::Removed);
        }
        let item = CartItem {
            show_id: show.id.to_string(),
            seat_id: seat.id.clone(),
            seat_info: seat.descriptor(),
            price: seat.price,
        };
        self.cart.push(item);
        Ok(SeatToggle::Added)
    }

    /// Step back: checkout → seats keeps the cart, seats → shows clears it.
    pub fn back(&mut self) -> Result<()> {
        match self.step {
            BookingStep::Shows => Err(Error::InvalidStep),
            BookingStep::Seats => {
                self.reset_to_shows();
                Ok(())
            }
            BookingStep::Checkout if self.processing => Err(Error::InvalidStep),
            BookingStep::Checkout => {
                self.step = BookingStep::Seats;
                Ok(())
            }
        }
    }

    /// `seats → checkout`, only with something in the cart.
    pub fn checkout(&mut self) -> Result<()> {
        if self.step != BookingStep::Seats {
            return Err(Error::InvalidStep);
        }
        if self.cart.is_empty() {
            return Err(Error::EmptyCart);
        }
        self.step = BookingStep::Checkout;
        Ok(())
    }

    /// Start the simulated payment. Returns the amount being charged.
    pub fn pay(&mut self) -> Result<u32> {
        if self.step != BookingStep::Checkout || self.processing {
            return Err(Error::InvalidStep);
        }
        if self.cart.is_empty() {
            return Err(Error::EmptyCart);
        }
        self.processing = true;
        Ok(self.total())
    }

    /// Finish the simulated payment: always succeeds, empties the cart and
    /// returns to the show list with nothing selected.
    pub fn complete(&mut self) -> Result<Receipt> {
        if !self.processing {
            return Err(Error::InvalidStep);
        }
        let receipt = Receipt {
            show_id: self.show.map(|s| s.id.to_string()),
            seats: self.cart.iter().map(|item| item.seat_info.clone()).collect(),
            total: self.total(),
        };
        self.reset_to_shows();
        info!(total = receipt.total, seats = receipt.seats.len(), "order placed");
        Ok(receipt)
    }

    fn reset_to_shows(&mut self) {
        self.cart.clear();
        self.seats.clear();
        self.show = None;
        self.processing = false;
        self.step = BookingStep::Shows;
    }
}
