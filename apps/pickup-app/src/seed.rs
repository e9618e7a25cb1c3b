//! # Seed Catalog
//!
//! Mock restaurants and menus the session browses. There is no backend; this
//! is the whole catalog.

use std::collections::HashMap;

use pickup_core::{
    Catalog, Customization, CustomizationOption, MenuItem, Money, Restaurant, SelectionMode,
};

const IMG: &str = "https://images.pexels.com/photos";

#[allow(clippy::too_many_arguments)]
fn restaurant(
    id: &str,
    name: &str,
    cuisine: &str,
    rating: f32,
    prep_time: &str,
    distance: &str,
    photo: u32,
    featured: bool,
) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        rating,
        prep_time: prep_time.to_string(),
        image: format!("{}/{}/pexels-photo-{}.jpeg?w=400", IMG, photo, photo),
        distance: distance.to_string(),
        featured,
        price_range: Some("$$".to_string()),
        description: None,
        address: None,
        phone: None,
    }
}

fn option(id: &str, name: &str, cents: i64) -> CustomizationOption {
    CustomizationOption {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::from_cents(cents),
    }
}

fn single(id: &str, name: &str, required: bool, options: Vec<CustomizationOption>) -> Customization {
    Customization {
        id: id.to_string(),
        name: name.to_string(),
        mode: SelectionMode::Single,
        required,
        options,
    }
}

fn multiple(id: &str, name: &str, options: Vec<CustomizationOption>) -> Customization {
    Customization {
        id: id.to_string(),
        name: name.to_string(),
        mode: SelectionMode::Multiple,
        required: false,
        options,
    }
}

struct Dish {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: &'static str,
    popular: bool,
    vegetarian: bool,
    calories: Option<u32>,
}

impl Dish {
    fn build(self, customizations: Vec<Customization>) -> MenuItem {
        MenuItem {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: Money::from_cents(self.cents),
            image: String::new(),
            category: self.category.to_string(),
            popular: self.popular,
            spicy: false,
            vegetarian: self.vegetarian,
            calories: self.calories,
            customizations,
        }
    }
}

fn pizza_size() -> Customization {
    single(
        "size",
        "Size",
        true,
        vec![
            option("small", "Small (10\")", 0),
            option("medium", "Medium (12\")", 200),
            option("large", "Large (14\")", 400),
        ],
    )
}

fn pizza_toppings() -> Customization {
    multiple(
        "toppings",
        "Extra Toppings",
        vec![
            option("cheese", "Extra Cheese", 150),
            option("mushrooms", "Mushrooms", 100),
            option("olives", "Olives", 100),
        ],
    )
}

fn marios_menu() -> Vec<MenuItem> {
    vec![
        Dish {
            id: "101",
            name: "Margherita Pizza",
            description: "Fresh mozzarella, tomato sauce, basil",
            cents: 1299,
            category: "Pizza",
            popular: true,
            vegetarian: true,
            calories: Some(850),
        }
        .build(vec![pizza_size(), pizza_toppings()]),
        Dish {
            id: "102",
            name: "Pepperoni Pizza",
            description: "Pepperoni, mozzarella, tomato sauce",
            cents: 1499,
            category: "Pizza",
            popular: true,
            vegetarian: false,
            calories: Some(980),
        }
        .build(vec![pizza_size(), pizza_toppings()]),
        Dish {
            id: "103",
            name: "Caesar Salad",
            description: "Romaine, parmesan, croutons, caesar dressing",
            cents: 899,
            category: "Salads",
            popular: false,
            vegetarian: true,
            calories: Some(420),
        }
        .build(vec![multiple(
            "protein",
            "Add Protein",
            vec![option("chicken", "Grilled Chicken", 300), option("shrimp", "Shrimp", 400)],
        )]),
        Dish {
            id: "104",
            name: "Tiramisu",
            description: "Espresso-soaked ladyfingers, mascarpone",
            cents: 699,
            category: "Desserts",
            popular: false,
            vegetarian: true,
            calories: Some(450),
        }
        .build(Vec::new()),
    ]
}

fn burger_menu() -> Vec<MenuItem> {
    vec![
        Dish {
            id: "201",
            name: "Classic Burger",
            description: "Beef patty, lettuce, tomato, house sauce",
            cents: 1099,
            category: "Burgers",
            popular: true,
            vegetarian: false,
            calories: Some(760),
        }
        .build(vec![
            single(
                "doneness",
                "Doneness",
                true,
                vec![
                    option("medium", "Medium", 0),
                    option("medium-well", "Medium Well", 0),
                    option("well", "Well Done", 0),
                ],
            ),
            multiple(
                "extras",
                "Extras",
                vec![
                    option("bacon", "Bacon", 200),
                    option("cheddar", "Cheddar", 100),
                    option("egg", "Fried Egg", 150),
                ],
            ),
        ]),
        Dish {
            id: "202",
            name: "Fries",
            description: "Crispy shoestring fries",
            cents: 399,
            category: "Sides",
            popular: true,
            vegetarian: true,
            calories: Some(380),
        }
        .build(vec![single(
            "size",
            "Size",
            false,
            vec![option("regular", "Regular", 0), option("large", "Large", 150)],
        )]),
        Dish {
            id: "203",
            name: "Coke",
            description: "Ice cold, 16 oz",
            cents: 250,
            category: "Drinks",
            popular: false,
            vegetarian: true,
            calories: Some(190),
        }
        .build(Vec::new()),
    ]
}

fn sushi_menu() -> Vec<MenuItem> {
    vec![
        Dish {
            id: "301",
            name: "Salmon Roll",
            description: "Fresh salmon, avocado, cucumber",
            cents: 1199,
            category: "Rolls",
            popular: true,
            vegetarian: false,
            calories: Some(310),
        }
        .build(vec![multiple(
            "sides",
            "Sides",
            vec![option("ginger", "Extra Ginger", 0), option("spicy-mayo", "Spicy Mayo", 75)],
        )]),
        Dish {
            id: "302",
            name: "Tuna Sashimi",
            description: "Eight slices of bluefin tuna",
            cents: 1499,
            category: "Sashimi",
            popular: false,
            vegetarian: false,
            calories: Some(240),
        }
        .build(Vec::new()),
        Dish {
            id: "303",
            name: "Miso Soup",
            description: "Tofu, wakame, scallions",
            cents: 399,
            category: "Soups",
            popular: false,
            vegetarian: true,
            calories: Some(80),
        }
        .build(Vec::new()),
    ]
}

fn green_bowl_menu() -> Vec<MenuItem> {
    vec![
        Dish {
            id: "401",
            name: "Buddha Bowl",
            description: "Quinoa, roasted chickpeas, greens, tahini",
            cents: 1149,
            category: "Bowls",
            popular: true,
            vegetarian: true,
            calories: Some(620),
        }
        .build(vec![single(
            "base",
            "Base",
            true,
            vec![option("quinoa", "Quinoa", 0), option("brown-rice", "Brown Rice", 0)],
        )]),
        Dish {
            id: "402",
            name: "Green Smoothie",
            description: "Spinach, banana, mango, almond milk",
            cents: 599,
            category: "Drinks",
            popular: false,
            vegetarian: true,
            calories: Some(280),
        }
        .build(vec![multiple(
            "boosts",
            "Boosts",
            vec![option("protein", "Protein", 150), option("chia", "Chia Seeds", 75)],
        )]),
    ]
}

/// Builds the mock catalog.
pub fn mock_catalog() -> Catalog {
    let restaurants = vec![
        restaurant("1", "Mario's Pizzeria", "Italian", 4.8, "15-20 min", "0.8 km", 315755, true),
        restaurant("2", "Burger Palace", "American", 4.6, "10-15 min", "1.2 km", 1639557, true),
        restaurant("3", "Sakura Sushi", "Japanese", 4.9, "20-25 min", "2.1 km", 357756, true),
        restaurant("4", "Green Bowl", "Healthy", 4.5, "10-15 min", "0.5 km", 1640777, false),
        restaurant("5", "Taco Fiesta", "Mexican", 4.4, "15-20 min", "1.7 km", 4958792, false),
    ];

    let mut menus = HashMap::new();
    menus.insert("1".to_string(), marios_menu());
    menus.insert("2".to_string(), burger_menu());
    menus.insert("3".to_string(), sushi_menu());
    menus.insert("4".to_string(), green_bowl_menu());

    Catalog::new(restaurants, menus)
}
