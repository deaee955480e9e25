//! Bloom suite: wide tables filtered on arbitrary column combinations.

use crate::generator::{GeneratorError, SynthContext};
use crate::generators::{
    coin, decimal, identifier, money, network, pick, pick_str, temporal, text, truncate,
    unique_value,
};
use chrono::Duration;
use rand::Rng;
use seed_core::{FieldValue, ParamType, Record, TableSpec, UniquenessTracker};

const COUNTRY_CODES: &[&str] = &["US", "RU", "DE", "FR", "CN", "JP", "BR", "IN", "GB", "CA"];
const REGISTRATION_SOURCES: &[&str] = &["web", "mobile", "social", "referral", "organic"];

/// Category with its subcategories and brands.
const PRODUCT_CATALOGUE: &[(&str, &[&str], &[&str])] = &[
    (
        "electronics",
        &["smartphones", "laptops", "tablets", "headphones", "cameras"],
        &["Samsung", "Apple", "Sony", "LG", "Xiaomi", "Huawei"],
    ),
    (
        "clothing",
        &["men", "women", "kids", "accessories"],
        &["Nike", "Adidas", "Zara", "H&M", "Uniqlo", "Levi's"],
    ),
    (
        "home",
        &["furniture", "kitchen", "bedding", "decor"],
        &["IKEA", "Williams-Sonoma", "Crate&Barrel", "Pottery Barn"],
    ),
    (
        "sports",
        &["fitness", "outdoor", "team sports", "water sports"],
        &["Nike", "Adidas", "Under Armour", "Puma", "Reebok"],
    ),
    (
        "books",
        &["fiction", "non-fiction", "educational", "children"],
        &["Penguin", "HarperCollins", "Random House", "Simon & Schuster"],
    ),
];
const COLORS: &[&str] = &[
    "black", "white", "red", "blue", "green", "yellow", "purple", "pink", "gray", "brown",
];
const SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL", "XXXL"];

const ORDER_STATUSES: &[&str] = &[
    "pending",
    "confirmed",
    "shipped",
    "delivered",
    "cancelled",
    "returned",
];
const PAYMENT_METHODS: &[&str] = &["credit_card", "debit_card", "paypal", "bank_transfer", "cash"];
const SHIPPING_METHODS: &[&str] = &["standard", "express", "overnight", "pickup"];
const DELIVERED_SHARE: f64 = 0.8;

const EVENT_TYPES: &[&str] = &[
    "login",
    "logout",
    "password_change",
    "profile_update",
    "failed_login",
    "suspicious_activity",
    "permission_change",
    "data_access",
];
const DEVICE_TYPES: &[&str] = &["desktop", "mobile", "tablet"];
const BROWSERS: &[&str] = &["Chrome", "Firefox", "Safari", "Edge", "Opera"];
const OPERATING_SYSTEMS: &[&str] = &["Windows", "macOS", "Linux", "iOS", "Android"];
const COUNTRIES: &[&str] = &[
    "United States",
    "Russia",
    "Germany",
    "France",
    "China",
    "Japan",
    "Brazil",
    "India",
];
const ANONYMOUS_SHARE: f64 = 0.1;

const LOCATION_CODES: &[&str] = &["A", "B", "C", "D", "E", "F"];
const BIN_NUMBERS: &[&str] = &["01", "02", "03", "04", "05", "06", "07", "08", "09", "10"];
const PERISHABLE_SHARE: f64 = 0.3;

/// Referenced customer and user ids default to the size of the users table.
const DEFAULT_MAX_USER_ID: u64 = 100_000;
/// Referenced product ids default to the size of the products table.
const DEFAULT_MAX_PRODUCT_ID: u64 = 80_000;

pub(super) fn users_table() -> TableSpec {
    TableSpec::new("users")
        .column("username", ParamType::Text)
        .column("email", ParamType::Text)
        .column("phone", ParamType::Text)
        .column("first_name", ParamType::Text)
        .column("last_name", ParamType::Text)
        .column("date_of_birth", ParamType::Date)
        .column("country_code", ParamType::Text)
        .column("city", ParamType::Text)
        .column("registration_source", ParamType::Text)
        .column("last_login", ParamType::Timestamp)
        .unique("username")
        .unique("email")
}

pub(super) fn products_table() -> TableSpec {
    TableSpec::new("products")
        .column("product_code", ParamType::Text)
        .column("name", ParamType::Text)
        .column("brand", ParamType::Text)
        .column("category", ParamType::Text)
        .column("subcategory", ParamType::Text)
        .column("supplier_id", ParamType::Int4)
        .column("manufacturer", ParamType::Text)
        .column("color", ParamType::Text)
        .column("size", ParamType::Text)
        .column("weight_kg", ParamType::Numeric)
        .column("price", ParamType::Numeric)
        .column("in_stock", ParamType::Bool)
}

pub(super) fn orders_table() -> TableSpec {
    TableSpec::new("orders")
        .column("order_number", ParamType::Text)
        .column("customer_id", ParamType::Int8)
        .column("order_status", ParamType::Text)
        .column("payment_method", ParamType::Text)
        .column("shipping_method", ParamType::Text)
        .column("warehouse_id", ParamType::Int4)
        .column("sales_rep_id", ParamType::Int4)
        .column("total_amount", ParamType::Numeric)
        .column("discount_amount", ParamType::Numeric)
        .column("order_date", ParamType::Date)
        .column("delivery_date", ParamType::Date)
        .unique("order_number")
}

pub(super) fn security_logs_table() -> TableSpec {
    TableSpec::new("security_logs")
        .column("event_type", ParamType::Text)
        .column("user_id", ParamType::Int8)
        .column("ip_address", ParamType::Inet)
        .column("user_agent", ParamType::Text)
        .column("device_type", ParamType::Text)
        .column("browser", ParamType::Text)
        .column("os", ParamType::Text)
        .column("country", ParamType::Text)
        .column("city", ParamType::Text)
        .column("success", ParamType::Bool)
        .column("details", ParamType::Text)
}

pub(super) fn inventory_table() -> TableSpec {
    TableSpec::new("inventory")
        .column("sku", ParamType::Text)
        .column("product_id", ParamType::Int8)
        .column("warehouse_id", ParamType::Int4)
        .column("location_code", ParamType::Text)
        .column("bin_number", ParamType::Text)
        .column("quantity", ParamType::Int4)
        .column("reserved_quantity", ParamType::Int4)
        .column("reorder_level", ParamType::Int4)
        .column("batch_number", ParamType::Text)
        .column("expiry_date", ParamType::Date)
        .column("supplier_batch", ParamType::Text)
        .unique("sku")
}

pub(super) fn user(
    ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let username = unique_value(ctx, tracker, "username", |ctx| {
        truncate(&text::username(ctx.rng()), 50)
    })?;
    let email = unique_value(ctx, tracker, "email", |ctx| {
        truncate(&text::email(ctx.rng()), 100)
    })?;
    let now = ctx.now();
    let rng = ctx.rng();

    Ok(Record::new(vec![
        username.into(),
        email.into(),
        truncate(&text::phone(rng), 20).into(),
        text::first_name(rng).into(),
        text::last_name(rng).into(),
        temporal::birth_date(rng, now, 18, 80).into(),
        pick_str(rng, COUNTRY_CODES).into(),
        text::city(rng).into(),
        pick_str(rng, REGISTRATION_SOURCES).into(),
        temporal::datetime_within_days(rng, now, 365).into(),
    ]))
}

/// Only clothing has a size; other categories leave it NULL.
pub(super) fn product(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let rng = ctx.rng();

    let (category, subcategories, brands) = *pick(rng, PRODUCT_CATALOGUE);
    let subcategory = pick_str(rng, subcategories);
    let brand = pick_str(rng, brands);
    let code = identifier::code(rng, "PROD", 100_000, 999_999);
    let name = truncate(&text::catch_phrase(rng), 200);
    let supplier_id = rng.gen_range(1..=100i32);
    let manufacturer = text::company(rng);
    let color = pick_str(rng, COLORS);
    let size = (category == "clothing").then(|| pick_str(rng, SIZES));

    Ok(Record::new(vec![
        code.into(),
        name.into(),
        brand.into(),
        category.into(),
        subcategory.into(),
        supplier_id.into(),
        manufacturer.into(),
        color.into(),
        FieldValue::optional(size),
        decimal(rng.gen_range(0.1..=50.0), 3).into(),
        money(rng, 10.0, 2000.0).into(),
        coin(rng).into(),
    ]))
}

/// Undelivered orders (about one in five) have no delivery date.
pub(super) fn order(
    ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let order_number = unique_value(ctx, tracker, "order_number", |ctx| {
        identifier::code(ctx.rng(), "ORD", 100_000, 999_999)
    })?;
    let customer_id = ctx.foreign_key(DEFAULT_MAX_USER_ID);
    let now = ctx.now();
    let rng = ctx.rng();

    let order_date = temporal::date_within_days(rng, now, 2 * 365);
    let delivery_date = rng
        .gen_bool(DELIVERED_SHARE)
        .then(|| order_date + Duration::days(rng.gen_range(1..=14)));

    Ok(Record::new(vec![
        order_number.into(),
        customer_id.into(),
        pick_str(rng, ORDER_STATUSES).into(),
        pick_str(rng, PAYMENT_METHODS).into(),
        pick_str(rng, SHIPPING_METHODS).into(),
        rng.gen_range(1..=10i32).into(),
        rng.gen_range(1..=50i32).into(),
        money(rng, 20.0, 5000.0).into(),
        money(rng, 0.0, 500.0).into(),
        order_date.into(),
        FieldValue::optional(delivery_date),
    ]))
}

/// About one event in ten is anonymous (NULL user).
pub(super) fn security_log(
    ctx: &mut SynthContext,
    _tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let user_id = ctx.foreign_key(DEFAULT_MAX_USER_ID);
    let rng = ctx.rng();

    let event_type = pick_str(rng, EVENT_TYPES);
    let user_id = (!rng.gen_bool(ANONYMOUS_SHARE)).then_some(user_id);

    Ok(Record::new(vec![
        event_type.into(),
        FieldValue::optional(user_id),
        network::ipv4(rng).into(),
        network::user_agent(rng).into(),
        pick_str(rng, DEVICE_TYPES).into(),
        pick_str(rng, BROWSERS).into(),
        pick_str(rng, OPERATING_SYSTEMS).into(),
        pick_str(rng, COUNTRIES).into(),
        text::city(rng).into(),
        coin(rng).into(),
        truncate(&text::paragraph(rng), 500).into(),
    ]))
}

/// Only perishable stock (about three in ten) carries an expiry date.
pub(super) fn inventory_item(
    ctx: &mut SynthContext,
    tracker: &mut UniquenessTracker,
    _index: u64,
) -> Result<Record, GeneratorError> {
    let sku = unique_value(ctx, tracker, "sku", |ctx| {
        identifier::code(ctx.rng(), "SKU", 10_000, 99_999)
    })?;
    let product_id = ctx.foreign_key(DEFAULT_MAX_PRODUCT_ID);
    let today = ctx.now().date();
    let rng = ctx.rng();

    let location = format!("{}{}", pick(rng, LOCATION_CODES), rng.gen_range(1..=20));
    let bin = pick_str(rng, BIN_NUMBERS);
    let quantity = rng.gen_range(0..=1000i32);
    let reserved = rng.gen_range(0..=100i32);
    let reorder_level = rng.gen_range(10..=100i32);
    let batch = identifier::code(rng, "BATCH", 1000, 9999);
    let expiry_date = rng
        .gen_bool(PERISHABLE_SHARE)
        .then(|| temporal::date_between(rng, today, today + Duration::days(365)));

    Ok(Record::new(vec![
        sku.into(),
        product_id.into(),
        rng.gen_range(1..=10i32).into(),
        location.into(),
        bin.into(),
        quantity.into(),
        reserved.into(),
        reorder_level.into(),
        batch.into(),
        FieldValue::optional(expiry_date),
        identifier::code(rng, "SUP", 100, 999).into(),
    ]))
}
