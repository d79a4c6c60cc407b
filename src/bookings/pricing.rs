/// Travel categories with a fixed per-passenger base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Train,
    Bus,
    Flight,
    Hotel,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Train,
        Category::Bus,
        Category::Flight,
        Category::Hotel,
    ];

    /// Unrecognized categories deliberately price as trains.
    pub fn parse(s: &str) -> Category {
        match s {
            "bus" => Category::Bus,
            "flight" => Category::Flight,
            "hotel" => Category::Hotel,
            _ => Category::Train,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Train => "train",
            Category::Bus => "bus",
            Category::Flight => "flight",
            Category::Hotel => "hotel",
        }
    }

    /// Base rate per passenger, in whole INR.
    pub fn base_rate(self) -> i64 {
        match self {
            Category::Train => 500,
            Category::Bus => 300,
            Category::Flight => 2000,
            Category::Hotel => 1500,
        }
    }
}

/// Total price for a party. No rounding, currency conversion or tax.
pub fn quote(category: Category, passengers: i32) -> i64 {
    category.base_rate() * passengers as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_rates_match_the_rate_card() {
        assert_eq!(Category::Train.base_rate(), 500);
        assert_eq!(Category::Bus.base_rate(), 300);
        assert_eq!(Category::Flight.base_rate(), 2000);
        assert_eq!(Category::Hotel.base_rate(), 1500);
    }

    #[test]
    fn quote_multiplies_by_passenger_count() {
        assert_eq!(quote(Category::Train, 2), 1000);
        assert_eq!(quote(Category::Bus, 3), 900);
        assert_eq!(quote(Category::Flight, 1), 2000);
    }

    #[test]
    fn unknown_categories_fall_back_to_train_rate() {
        for unknown in ["boat", "TRAIN", "rocket", ""] {
            assert_eq!(quote(Category::parse(unknown), 3), 500 * 3);
        }
    }

    #[test]
    fn parse_roundtrips_known_categories() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), category);
        }
    }
}
