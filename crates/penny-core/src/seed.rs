//! Built-in seed training data
//!
//! A baseline set of labeled expense descriptions covering every category.
//! Every training run starts from this set so the model never forgets a
//! category just because no corrections mention it.

/// `(description, category)` pairs. Kept category-balanced on purpose:
/// class priors should come from corrections, not from seed skew.
pub const SEED_EXAMPLES: &[(&str, &str)] = &[
    // Food & Dining
    ("Grocery shopping at Walmart", "Food & Dining"),
    ("Restaurant dinner with friends", "Food & Dining"),
    ("Coffee at Starbucks", "Food & Dining"),
    ("Pizza delivery from Domino's", "Food & Dining"),
    ("Fast food at McDonald's", "Food & Dining"),
    ("Takeout Chinese food", "Food & Dining"),
    ("Grocery delivery from Instacart", "Food & Dining"),
    ("Whole Foods Market", "Food & Dining"),
    ("Trader Joe's groceries", "Food & Dining"),
    ("Sushi restaurant", "Food & Dining"),
    ("Bakery items", "Food & Dining"),
    ("Food truck lunch", "Food & Dining"),
    // Transportation
    ("Gas station fill up", "Transportation"),
    ("Monthly train pass", "Transportation"),
    ("Uber ride home", "Transportation"),
    ("Car repair service", "Transportation"),
    ("Oil change and tire rotation", "Transportation"),
    ("Subway fare", "Transportation"),
    ("Parking garage fee", "Transportation"),
    ("Highway toll payment", "Transportation"),
    ("Lyft to airport", "Transportation"),
    ("Taxi fare", "Transportation"),
    ("New tires for car", "Transportation"),
    ("Annual vehicle registration", "Transportation"),
    // Housing
    ("Monthly rent payment", "Housing"),
    ("Mortgage payment", "Housing"),
    ("Plumber service call", "Housing"),
    ("New sofa purchase", "Housing"),
    ("Lawn mowing service", "Housing"),
    ("Home renovation supplies", "Housing"),
    ("Home cleaning service", "Housing"),
    ("Air conditioner repair", "Housing"),
    ("Bedroom furniture", "Housing"),
    ("HOA monthly fee", "Housing"),
    ("Pest control service", "Housing"),
    ("New mattress", "Housing"),
    // Utilities
    ("Water bill", "Utilities"),
    ("Internet service monthly", "Utilities"),
    ("Cell phone bill", "Utilities"),
    ("Natural gas bill", "Utilities"),
    ("Trash collection fee", "Utilities"),
    ("TV cable package", "Utilities"),
    ("Electricity monthly bill", "Utilities"),
    ("Sewer service", "Utilities"),
    ("Propane tank refill", "Utilities"),
    ("New WiFi router", "Utilities"),
    ("Energy bill payment", "Utilities"),
    ("Smart thermostat", "Utilities"),
    // Healthcare
    ("Doctor's office co-pay", "Healthcare"),
    ("Prescription medication", "Healthcare"),
    ("Dentist appointment", "Healthcare"),
    ("Eye doctor visit", "Healthcare"),
    ("Therapy session", "Healthcare"),
    ("Urgent care visit", "Healthcare"),
    ("New glasses", "Healthcare"),
    ("Chiropractor visit", "Healthcare"),
    ("Dental cleaning", "Healthcare"),
    ("Physical therapy session", "Healthcare"),
    ("Vitamin supplements", "Healthcare"),
    ("Pharmacy checkout", "Healthcare"),
    // Entertainment
    ("Movie theater tickets", "Entertainment"),
    ("Netflix monthly fee", "Entertainment"),
    ("Concert tickets", "Entertainment"),
    ("Video game purchase", "Entertainment"),
    ("Sporting event tickets", "Entertainment"),
    ("Spotify subscription", "Entertainment"),
    ("Bowling night", "Entertainment"),
    ("Museum admission", "Entertainment"),
    ("Amusement park entry", "Entertainment"),
    ("Board game purchase", "Entertainment"),
    ("Comedy club tickets", "Entertainment"),
    ("Festival tickets", "Entertainment"),
    // Shopping
    ("New jeans at department store", "Shopping"),
    ("Online clothes shopping", "Shopping"),
    ("Electronics store purchase", "Shopping"),
    ("Amazon order", "Shopping"),
    ("Home goods at Target", "Shopping"),
    ("New shoes purchase", "Shopping"),
    ("Cosmetics at Sephora", "Shopping"),
    ("Home Depot supplies", "Shopping"),
    ("Jewelry purchase", "Shopping"),
    ("Best Buy purchase", "Shopping"),
    ("Clothing at mall", "Shopping"),
    ("Thrift store finds", "Shopping"),
    // Education
    ("University tuition payment", "Education"),
    ("College textbooks", "Education"),
    ("Online course subscription", "Education"),
    ("School supplies", "Education"),
    ("Professional certification fee", "Education"),
    ("Language learning app subscription", "Education"),
    ("Private tutor session", "Education"),
    ("Student loan payment", "Education"),
    ("Coding bootcamp payment", "Education"),
    ("Music lessons", "Education"),
    ("MBA program tuition", "Education"),
    ("Laptop for school", "Education"),
    // Personal Care
    ("Haircut and styling", "Personal Care"),
    ("Spa day package", "Personal Care"),
    ("Manicure and pedicure", "Personal Care"),
    ("Massage therapy session", "Personal Care"),
    ("Gym membership fee", "Personal Care"),
    ("Personal trainer session", "Personal Care"),
    ("Hair care products", "Personal Care"),
    ("Yoga class package", "Personal Care"),
    ("Skincare products", "Personal Care"),
    ("Nail salon visit", "Personal Care"),
    ("Perfume purchase", "Personal Care"),
    ("Tanning salon", "Personal Care"),
    // Travel
    ("Flight tickets to Miami", "Travel"),
    ("Hotel stay in Chicago", "Travel"),
    ("Airbnb booking for weekend", "Travel"),
    ("Rental car for vacation", "Travel"),
    ("Cruise ship booking", "Travel"),
    ("Travel insurance policy", "Travel"),
    ("Tourist attraction tickets", "Travel"),
    ("Beach vacation rental", "Travel"),
    ("Ski trip lift tickets", "Travel"),
    ("Luggage purchase", "Travel"),
    ("Passport renewal fee", "Travel"),
    ("Camping site reservation", "Travel"),
    // Investments
    ("Stock market investment", "Investments"),
    ("Mutual fund contribution", "Investments"),
    ("Retirement account deposit", "Investments"),
    ("Cryptocurrency purchase", "Investments"),
    ("Brokerage account fee", "Investments"),
    ("Financial advisor fee", "Investments"),
    ("Bond purchase", "Investments"),
    ("Index fund purchase", "Investments"),
    ("IRA contribution", "Investments"),
    ("ETF purchase", "Investments"),
    ("401k contribution", "Investments"),
    ("Treasury bills purchase", "Investments"),
    // Gifts & Donations
    ("Birthday gift for friend", "Gifts & Donations"),
    ("Wedding present", "Gifts & Donations"),
    ("Holiday gift shopping", "Gifts & Donations"),
    ("Charitable donation to Red Cross", "Gifts & Donations"),
    ("Church donation", "Gifts & Donations"),
    ("Baby shower gift", "Gifts & Donations"),
    ("Gift card purchase", "Gifts & Donations"),
    ("Donation to local food bank", "Gifts & Donations"),
    ("Fundraiser contribution", "Gifts & Donations"),
    ("Animal shelter donation", "Gifts & Donations"),
    ("GoFundMe contribution", "Gifts & Donations"),
    ("Religious tithing", "Gifts & Donations"),
    // Insurance
    ("Car insurance premium", "Insurance"),
    ("Home insurance payment", "Insurance"),
    ("Health insurance monthly premium", "Insurance"),
    ("Life insurance policy payment", "Insurance"),
    ("Renter's insurance", "Insurance"),
    ("Dental insurance premium", "Insurance"),
    ("Pet insurance plan", "Insurance"),
    ("Vision insurance payment", "Insurance"),
    ("Motorcycle insurance", "Insurance"),
    ("Disability insurance premium", "Insurance"),
    ("Flood insurance premium", "Insurance"),
    ("Umbrella insurance policy", "Insurance"),
    // Taxes
    ("Federal tax payment", "Taxes"),
    ("State income tax", "Taxes"),
    ("Property tax bill", "Taxes"),
    ("Tax preparation service fee", "Taxes"),
    ("Self-employment tax payment", "Taxes"),
    ("Estimated quarterly tax payment", "Taxes"),
    ("Tax software purchase", "Taxes"),
    ("Back taxes payment", "Taxes"),
    ("Local income tax", "Taxes"),
    ("Tax penalty payment", "Taxes"),
    ("County tax bill", "Taxes"),
    ("Excise tax", "Taxes"),
    // Miscellaneous
    ("ATM withdrawal fee", "Miscellaneous"),
    ("Bank account monthly fee", "Miscellaneous"),
    ("Safe deposit box rental", "Miscellaneous"),
    ("Money order purchase", "Miscellaneous"),
    ("Notary public service", "Miscellaneous"),
    ("Credit card annual fee", "Miscellaneous"),
    ("Storage unit rental", "Miscellaneous"),
    ("Veterinary visit", "Miscellaneous"),
    ("Dog grooming", "Miscellaneous"),
    ("Dry cleaning", "Miscellaneous"),
    ("Laundromat service", "Miscellaneous"),
    ("Moving truck rental", "Miscellaneous"),
];

/// Seed examples as owned `(description, category)` pairs
pub fn seed_examples() -> Vec<(String, String)> {
    SEED_EXAMPLES
        .iter()
        .map(|(d, c)| (d.to_string(), c.to_string()))
        .collect()
}

/// Distinct seed categories in first-seen order
pub fn seed_categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for (_, category) in SEED_EXAMPLES {
        if !seen.contains(category) {
            seen.push(category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_seed_is_category_balanced() {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, category) in SEED_EXAMPLES {
            *counts.entry(category).or_default() += 1;
        }

        assert_eq!(counts.len(), 15);
        for (category, count) in counts {
            assert_eq!(count, 12, "unbalanced category: {}", category);
        }
    }

    #[test]
    fn test_seed_descriptions_unique_within_category() {
        let mut seen = std::collections::HashSet::new();
        for (description, category) in SEED_EXAMPLES {
            assert!(
                seen.insert((description, category)),
                "duplicate: {} / {}",
                description,
                category
            );
        }
    }

    #[test]
    fn test_seed_categories_order_stable() {
        let categories = seed_categories();
        assert_eq!(categories[0], "Food & Dining");
        assert_eq!(categories.len(), 15);
    }
}
