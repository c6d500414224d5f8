//! Audience reviews: the built-in carousel and the "leave a review" form.

use crate::error::{Error, Result};

pub struct Review {
    pub id: u32,
    pub name: &'static str,
    pub age: u32,
    pub city: &'static str,
    pub text: &'static str,
    pub rating: u8,
    pub avatar: &'static str,
}

pub const REVIEWS: [Review; 10] = [
    Review { id: 1, name: "Anna Petrova", age: 28, city: "Moscow", text: "I didn't believe in magic before that evening. Dmitry made me doubt reality itself. I still have goosebumps!", rating: 5, avatar: "/reviewer-1.png" },
    Review { id: 2, name: "Mikhail Sokolov", age: 35, city: "Saint Petersburg", text: "I brought my sceptical wife. Now she's the first to talk about miracles. An incredible show!", rating: 5, avatar: "/reviewer-2.png" },
    Review { id: 3, name: "Elena Vasilyeva", age: 42, city: "Yaroslavl", text: "My teenage son put down his phone and watched with his mouth open. That alone is priceless!", rating: 5, avatar: "/reviewer-3.png" },
    Review { id: 4, name: "Dmitry Kuznetsov", age: 31, city: "Nizhny Novgorod", text: "I work in IT and I'm used to logic. What I saw on stage defies explanation. Brilliant!", rating: 5, avatar: "/reviewer-4.png" },
    Review { id: 5, name: "Olga Morozova", age: 25, city: "Kazan", text: "We went for a friend's birthday. Best present ever: these emotions! I cried with delight.", rating: 5, avatar: "/reviewer-5.png" },
    Review { id: 6, name: "Alexander Volkov", age: 45, city: "Yekaterinburg", text: "I've seen plenty of magicians, but Dmitry is on another level. Pure art!", rating: 5, avatar: "/reviewer-6.png" },
    Review { id: 7, name: "Maria Kozlova", age: 33, city: "Voronezh", text: "A stunning show! Every act is a little miracle. I'll definitely come again!", rating: 5, avatar: "/reviewer-7.png" },
    Review { id: 8, name: "Sergey Ivanov", age: 29, city: "Tula", text: "An incredible atmosphere! Dmitry knows how to create real magic. Recommended to everyone!", rating: 5, avatar: "/reviewer-8.png" },
    Review { id: 9, name: "Tatiana Smirnova", age: 38, city: "Ryazan", text: "The show exceeded every expectation. I've never seen illusions at this level. Bravo!", rating: 5, avatar: "/reviewer-9.png" },
    Review { id: 10, name: "Andrey Petrov", age: 41, city: "Tver", text: "Professionalism at the highest level! Every minute of the show keeps you on edge.", rating: 5, avatar: "/reviewer-10.png" },
];

/// Carousel position and autoplay flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    autoplay: bool,
}

impl Default for Carousel {
    fn default() -> Self {
        Self { index: 0, autoplay: true }
    }
}

impl Carousel {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay
    }

    pub fn current(&self) -> &'static Review {
        &REVIEWS[self.index]
    }

    /// Autoplay step; ignored while paused.
    pub fn tick(&mut self) {
        if self.autoplay {
            self.index = (self.index + 1) % REVIEWS.len();
        }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % REVIEWS.len();
        self.autoplay = false;
    }

    pub fn prev(&mut self) {
        self.index = (self.index + REVIEWS.len() - 1) % REVIEWS.len();
        self.autoplay = false;
    }

    /// Out-of-range indices wrap.
    pub fn go_to(&mut self, index: usize) {
        self.index = index % REVIEWS.len();
        self.autoplay = false;
    }

    pub fn resume(&mut self) {
        self.autoplay = true;
    }
}

/// A validated visitor review. Submissions are acknowledged, not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub name: String,
    pub age: u32,
    pub city: String,
    pub text: String,
    pub rating: u8,
}

const DEFAULT_RATING: u8 = 5;

/// Raw form fields as submitted; absent fields are `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewForm<'a> {
    pub name: Option<&'a str>,
    pub age: Option<&'a str>,
    pub city: Option<&'a str>,
    pub text: Option<&'a str>,
    pub rating: Option<&'a str>,
}

fn required(field: Option<&str>, message: &'static str) -> Result<String> {
    field
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(Error::InvalidReview(message))
}

impl ReviewSubmission {
    pub fn validate(form: ReviewForm<'_>) -> Result<Self> {
        let name = required(form.name, "name is required")?;
        let age = required(form.age, "age is required")?
            .parse::<u32>()
            .ok()
            .filter(|age| *age > 0)
            .ok_or(Error::InvalidReview("age must be a positive number"))?;
        let city = required(form.city, "city is required")?;
        let text = required(form.text, "review text is required")?;
        let rating = match form.rating.map(str::trim) {
            None | Some("") => DEFAULT_RATING,
            Some(raw) => raw
                .parse::<u8>()
                .ok()
                .filter(|r| (1..=5).contains(r))
                .ok_or(Error::InvalidReview("rating must be between 1 and 5"))?,
        };

        Ok(Self { name, age, city, text, rating })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_wraps() {
        let mut c = Carousel::default();
        for _ in 0..REVIEWS.len() {
            c.tick();
        }
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn manual_navigation_pauses_autoplay() {
        let mut c = Carousel::default();
        c.prev();
        assert_eq!(c.index(), REVIEWS.len() - 1);
        assert!(!c.is_autoplaying());
        c.tick();
        assert_eq!(c.index(), REVIEWS.len() - 1);
        c.resume();
        c.tick();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn go_to_wraps_out_of_range() {
        let mut c = Carousel::default();
        c.go_to(13);
        assert_eq!(c.index(), 3);
        assert_eq!(c.current().id, 4);
    }

    fn form<'a>(name: &'a str, age: &'a str, rating: Option<&'a str>) -> ReviewForm<'a> {
        ReviewForm {
            name: Some(name),
            age: Some(age),
            city: Some("Omsk"),
            text: Some("Wow!"),
            rating,
        }
    }

    #[test]
    fn valid_form_is_accepted() {
        let review = ReviewSubmission::validate(form(" Ivan ", "30", Some("4"))).unwrap();
        assert_eq!(review.name, "Ivan");
        assert_eq!(review.text, "Wow!");
        assert_eq!(review.rating, 4);
    }

    #[test]
    fn rating_defaults_to_five() {
        assert_eq!(ReviewSubmission::validate(form("Ivan", "30", None)).unwrap().rating, 5);
        assert_eq!(ReviewSubmission::validate(form("Ivan", "30", Some(""))).unwrap().rating, 5);
    }

    #[test]
    fn invalid_forms_are_rejected() {
        let cases = [
            ReviewForm { name: None, ..form("", "30", None) },
            form(" ", "30", None),
            form("Ivan", "old", None),
            form("Ivan", "0", None),
            form("Ivan", "30", Some("6")),
            ReviewForm { city: None, ..form("Ivan", "30", None) },
        ];
        for case in cases {
            assert!(
                matches!(ReviewSubmission::validate(case), Err(Error::InvalidReview(_))),
                "{case:?}"
            );
        }
    }
}
