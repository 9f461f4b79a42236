//! Reply templates.
//!
//! Replies are plain strings with light markdown: `**bold**`, `*italic*`,
//! bullet lines and, for comparisons, a pipe table. Renderers may ignore the
//! markup.

use carwise_core::{BodyType, FuelType, MaintenanceRecord, VehicleRecord};

/// Reply to any greeting.
pub const GREETING: &str = "👋 Hi! I provide car advice based on real datasets.\n\n\
You can ask:\n\
• *I drive mostly in city*\n\
• *Suggest me a 7 seater car*\n\
• *Tell me about Toyota Vios*\n\
• *Compare Toyota Vios and Perodua Myvi*\n\
• *Why choose the Perodua Alza?*\n\
• *How often should I service Perodua Myvi?*";

/// Reply when no intent matches.
pub const FALLBACK: &str = "🤔 I couldn't find that in my dataset.\n\n\
Try asking:\n\
• *I drive mostly in city*\n\
• *Suggest me a 7 seater car*\n\
• *How often should I service Toyota Vios?*";

/// Reply when a comparison names fewer than two known models.
pub const COMPARISON_GUIDANCE: &str = "⚖️ Please mention at least two car models from the \
dataset to compare, e.g. *Compare Toyota Vios and Perodua Myvi*.";

pub const NO_SUITABLE_CARS: &str = "❌ No suitable cars found in the dataset.";

pub const NO_SEAT_MATCH: &str = "❌ No cars found with that seating capacity.";

pub const SPECIFY_MODEL: &str = "🛠 Please specify a car model found in the dataset.";

// =============================================================================
// Single-record replies
// =============================================================================

pub fn vehicle_info(v: &VehicleRecord) -> String {
    format!(
        "🚘 **{} {}**\n\n\
         • Engine: {}\n\
         • Fuel: {}\n\
         • Seats: {}\n\
         • Type: {}\n",
        v.brand, v.model, v.engine, v.fuel, v.seats, v.body_type
    )
}

pub fn maintenance_schedule(m: &MaintenanceRecord) -> String {
    format!(
        "🛠 **Maintenance Schedule – {} {}**\n\n\
         • Engine oil: every **{} km**\n\
         • Major service: every **{} km**\n\
         • Battery lifespan: **{} years**\n\
         • Tyre rotation: every **{} km**\n",
        m.brand,
        m.model,
        group_thousands(m.engine_oil_km),
        group_thousands(m.major_service_km),
        m.battery_years,
        group_thousands(m.tyre_rotation_km)
    )
}

/// Rationale for a vehicle, one sentence per rule that applies.
///
/// The seat rule always applies; the body and fuel rules only for the types
/// they know.
pub fn explanation(v: &VehicleRecord) -> String {
    let mut reasons = Vec::with_capacity(3);

    if v.seats >= 7 {
        reasons.push(format!(
            "With {} seats, it comfortably carries larger families or groups.",
            v.seats
        ));
    } else {
        reasons.push(format!(
            "With {} seats, it suits solo drivers, couples and small families.",
            v.seats
        ));
    }

    match v.body_type {
        BodyType::Hatchback | BodyType::Sedan => reasons.push(format!(
            "As a {}, it is easy to park and economical for daily commuting.",
            v.body_type
        )),
        BodyType::Suv | BodyType::Mpv => reasons.push(format!(
            "As an {}, it offers extra space and versatility for family trips and luggage.",
            v.body_type.as_str().to_uppercase()
        )),
        BodyType::Other(_) => {}
    }

    match v.fuel {
        FuelType::Petrol => reasons
            .push("Its petrol engine keeps running costs low for mostly urban driving.".to_string()),
        FuelType::Diesel => reasons.push(
            "Its diesel engine delivers strong torque and better economy over long distances."
                .to_string(),
        ),
        _ => {}
    }

    let mut reply = format!("💡 **Why the {} {}?**\n\n", v.brand, v.model);
    for reason in reasons {
        reply.push_str(&format!("• {}\n", reason));
    }
    reply
}

/// Side-by-side table of two vehicles, `a` in the first data column.
pub fn comparison(a: &VehicleRecord, b: &VehicleRecord) -> String {
    let (an, bn) = (a.full_name(), b.full_name());
    let mut lines = vec![
        format!("⚖️ **{} vs {}**", an, bn),
        String::new(),
        format!("| Spec | {} | {} |", an, bn),
        "|---|---|---|".to_string(),
    ];
    lines.push(format!("| Engine | {} | {} |", a.engine, b.engine));
    lines.push(format!("| Fuel | {} | {} |", a.fuel, b.fuel));
    lines.push(format!("| Seats | {} | {} |", a.seats, b.seats));
    lines.push(format!("| Type | {} | {} |", a.body_type, b.body_type));
    lines.join("\n") + "\n"
}

// =============================================================================
// Listings
// =============================================================================

pub fn usage_listing(body: &BodyType, keyword: &str, rows: &[&VehicleRecord]) -> String {
    let mut reply = format!(
        "🚗 **Recommended {} Cars for {} Driving:**\n\n",
        title_case(body.as_str()),
        title_case(keyword)
    );
    for v in rows {
        reply.push_str(&format!("• {} {} ({})\n", v.brand, v.model, v.engine));
    }
    reply
}

pub fn seat_listing(seats: u32, rows: &[&VehicleRecord]) -> String {
    let mut reply = format!("🚗 **{}-Seater Cars from Dataset:**\n\n", seats);
    for v in rows {
        reply.push_str(&format!("• {} {} ({})\n", v.brand, v.model, v.body_type));
    }
    reply
}

// =============================================================================
// Helpers
// =============================================================================

/// `40000` -> `"40,000"`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Uppercase the first letter of each space-separated word.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
