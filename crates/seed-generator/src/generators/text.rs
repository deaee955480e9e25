//! Free-text and person/place generators backed by `fake`.

use super::capitalize;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::company::en::{CatchPhrase, CompanyName};
use fake::faker::internet::en::{FreeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;

pub fn word<R: Rng + ?Sized>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

/// Two capitalized words joined by a space, e.g. `Alpha Beta`.
pub fn title_words<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = word(rng);
    let second = word(rng);
    format!("{} {}", capitalize(&first), capitalize(&second))
}

/// A sentence of 4 to 10 words.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    Sentence(4..10).fake_with_rng(rng)
}

/// A paragraph of 3 to 6 sentences.
pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    Paragraph(3..6).fake_with_rng(rng)
}

/// `count` paragraphs separated by blank lines.
pub fn paragraphs<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| paragraph(rng))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

pub fn catch_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    CatchPhrase().fake_with_rng(rng)
}

pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    FirstName().fake_with_rng(rng)
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    LastName().fake_with_rng(rng)
}

pub fn username<R: Rng + ?Sized>(rng: &mut R) -> String {
    Username().fake_with_rng(rng)
}

/// `<username>@<free-mail provider>`.
pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    FreeEmail().fake_with_rng(rng)
}

pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    PhoneNumber().fake_with_rng(rng)
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    CityName().fake_with_rng(rng)
}

/// Single-line postal address.
pub fn address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city = city(rng);
    let zip: String = ZipCode().fake_with_rng(rng);
    format!("{number} {street}, {city} {zip}")
}
