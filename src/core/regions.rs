use crate::domain::model::RegionPrice;

/// Offsets in INR relative to the national 24K base price.
pub const REGION_OFFSETS: &[(&str, i64)] = &[
    // North
    ("Delhi", 21),
    ("Haryana", 14),
    ("Punjab", 16),
    ("Himachal Pradesh", 19),
    ("Jammu and Kashmir", 18),
    ("Ladakh", 22),
    ("Uttarakhand", 12),
    ("Uttar Pradesh", 17),
    ("Chandigarh", 15),
    ("Rajasthan", 24),
    // West
    ("Maharashtra", 23),
    ("Gujarat", 16),
    ("Goa", 15),
    ("Dadra and Nagar Haveli", 19),
    ("Daman and Diu", 18),
    // South
    ("Karnataka", 10),
    ("Tamil Nadu", 8),
    ("Kerala", -25),
    ("Telangana", -8),
    ("Andhra Pradesh", -18),
    ("Puducherry", -20),
    ("Lakshadweep", 14),
    ("Andaman and Nicobar Islands", 130),
    // East
    ("West Bengal", 60),
    ("Odisha", 40),
    ("Bihar", 50),
    ("Jharkhand", 50),
    // Central
    ("Madhya Pradesh", 50),
    ("Chhattisgarh", 40),
    // North East
    ("Assam", 80),
    ("Sikkim", 100),
    ("Arunachal Pradesh", 200),
    ("Manipur", 200),
    ("Meghalaya", 180),
    ("Mizoram", 200),
    ("Nagaland", 200),
    ("Tripura", 200),
];

/// Prices are published as signed values; anything past `i64::MAX` clamps.
pub(crate) fn signed_price(price: u64) -> i64 {
    i64::try_from(price).unwrap_or(i64::MAX)
}

/// 22K is 91.66% pure.
pub fn base_22k(base_24k: u64) -> i64 {
    signed_price(base_24k).saturating_mul(9166) / 10_000
}

/// One entry per region, sorted by name for the UI dropdown.
pub fn calculate_all_regions(base_24k: u64) -> Vec<RegionPrice> {
    let base_22k = base_22k(base_24k);

    let mut results: Vec<RegionPrice> = REGION_OFFSETS
        .iter()
        .map(|&(name, offset)| {
            let p24 = signed_price(base_24k).saturating_add(offset);
            // 22K 的地區差價略小 (truncates toward zero)
            let p22 = base_22k.saturating_add(offset * 9 / 10);
            RegionPrice {
                name: name.to_string(),
                p24,
                p22,
                p24_1g: p24.div_euclid(10),
                p22_1g: p22.div_euclid(10),
            }
        })
        .collect();

    results.sort_by(|a, b| a.name.cmp(&b.name));
    results
}
