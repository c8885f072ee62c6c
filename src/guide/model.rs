//! Guide data model
//!
//! A section is decoded in two steps: the envelope (`id`, `titolo`, `icona`,
//! `contenuto`) first, then the content against the shape its key selects.
//! Keys outside the known set are kept as `SectionContent::Unrecognized`.
//!
//! Every content field is optional. Lists default to empty, and a `null`
//! list or list entry is read the same as an absent one.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

use crate::core::error::SectionError;
use crate::core::loader::{list_skip_nulls, null_as_default};

/// Known section keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Electricity,
    InternetSim,
    CurrencyPayments,
    Transport,
    Embassy,
    Emergencies,
    Health,
    PracticalAdvice,
}

impl SectionKey {
    pub const ALL: [SectionKey; 8] = [
        SectionKey::Electricity,
        SectionKey::InternetSim,
        SectionKey::CurrencyPayments,
        SectionKey::Transport,
        SectionKey::Embassy,
        SectionKey::Emergencies,
        SectionKey::Health,
        SectionKey::PracticalAdvice,
    ];

    /// Key as it appears in the guide document
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Electricity => "elettricita",
            SectionKey::InternetSim => "internet_sim",
            SectionKey::CurrencyPayments => "moneta_pagamenti",
            SectionKey::Transport => "trasporti",
            SectionKey::Embassy => "ambasciata",
            SectionKey::Emergencies => "emergenze",
            SectionKey::Health => "salute",
            SectionKey::PracticalAdvice => "consigli_pratici",
        }
    }

    /// English alias accepted on the command line
    pub fn alias(&self) -> &'static str {
        match self {
            SectionKey::Electricity => "electricity",
            SectionKey::InternetSim => "internet",
            SectionKey::CurrencyPayments => "currency",
            SectionKey::Transport => "transport",
            SectionKey::Embassy => "embassy",
            SectionKey::Emergencies => "emergencies",
            SectionKey::Health => "health",
            SectionKey::PracticalAdvice => "advice",
        }
    }
}

impl std::str::FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted || key.alias() == wanted)
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

/// Free text that may be written as a string, number or boolean in the data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(s.to_string())
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Text(s)),
            Value::Number(n) => Ok(Text(n.to_string())),
            Value::Bool(b) => Ok(Text(if b { "sì" } else { "no" }.to_string())),
            other => Err(D::Error::custom(format!("expected text, found {}", other))),
        }
    }
}

/// The travel guide
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Guide {
    #[serde(rename = "sezioni", default, deserialize_with = "list_skip_nulls")]
    pub sections: Vec<Section>,
}

impl Guide {
    /// Sections whose key matches any of the given keys, in document order
    pub fn sections_for<'a>(&'a self, keys: &'a [SectionKey]) -> impl Iterator<Item = &'a Section> {
        self.sections
            .iter()
            .filter(move |section| section.known_key().is_some_and(|k| keys.contains(&k)))
    }
}

#[derive(Deserialize)]
struct RawSection {
    id: String,
    #[serde(rename = "titolo", default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(rename = "icona", default)]
    icon: Option<String>,
    #[serde(rename = "contenuto", default)]
    content: Option<Value>,
}

/// One guide topic
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSection")]
pub struct Section {
    pub title: String,
    pub icon: Option<String>,
    pub content: SectionContent,
}

impl Section {
    /// Key as written in the document
    pub fn key(&self) -> &str {
        self.content.key()
    }

    pub fn known_key(&self) -> Option<SectionKey> {
        self.content.known_key()
    }
}

impl TryFrom<RawSection> for Section {
    type Error = SectionError;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        let content = match raw.id.parse::<SectionKey>() {
            Ok(key) if key.as_str() == raw.id => {
                let value = raw
                    .content
                    .ok_or_else(|| SectionError::MissingContent(raw.id.clone()))?;
                SectionContent::decode(key, value).map_err(|source| SectionError::Content {
                    key: raw.id.clone(),
                    source,
                })?
            }
            _ => SectionContent::Unrecognized { key: raw.id },
        };

        Ok(Section {
            title: raw.title,
            icon: raw.icon,
            content,
        })
    }
}

/// Section payload, one variant per known key
#[derive(Debug, Clone)]
pub enum SectionContent {
    Electricity(Electricity),
    InternetSim(InternetSim),
    CurrencyPayments(CurrencyPayments),
    Transport(Transport),
    Embassy(Embassy),
    Emergencies(Emergencies),
    Health(Health),
    PracticalAdvice(PracticalAdvice),
    Unrecognized { key: String },
}

impl SectionContent {
    fn decode(key: SectionKey, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match key {
            SectionKey::Electricity => SectionContent::Electricity(serde_json::from_value(value)?),
            SectionKey::InternetSim => SectionContent::InternetSim(serde_json::from_value(value)?),
            SectionKey::CurrencyPayments => {
                SectionContent::CurrencyPayments(serde_json::from_value(value)?)
            }
            SectionKey::Transport => SectionContent::Transport(serde_json::from_value(value)?),
            SectionKey::Embassy => SectionContent::Embassy(serde_json::from_value(value)?),
            SectionKey::Emergencies => SectionContent::Emergencies(serde_json::from_value(value)?),
            SectionKey::Health => SectionContent::Health(serde_json::from_value(value)?),
            SectionKey::PracticalAdvice => {
                SectionContent::PracticalAdvice(serde_json::from_value(value)?)
            }
        })
    }

    pub fn known_key(&self) -> Option<SectionKey> {
        match self {
            SectionContent::Electricity(_) => Some(SectionKey::Electricity),
            SectionContent::InternetSim(_) => Some(SectionKey::InternetSim),
            SectionContent::CurrencyPayments(_) => Some(SectionKey::CurrencyPayments),
            SectionContent::Transport(_) => Some(SectionKey::Transport),
            SectionContent::Embassy(_) => Some(SectionKey::Embassy),
            SectionContent::Emergencies(_) => Some(SectionKey::Emergencies),
            SectionContent::Health(_) => Some(SectionKey::Health),
            SectionContent::PracticalAdvice(_) => Some(SectionKey::PracticalAdvice),
            SectionContent::Unrecognized { .. } => None,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SectionContent::Unrecognized { key } => key,
            known => known.known_key().map(|k| k.as_str()).unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Electricity

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Electricity {
    #[serde(rename = "avviso_importante", default)]
    pub warning: Option<Text>,
    #[serde(rename = "voltaggio", default)]
    pub voltage: Option<Text>,
    #[serde(rename = "tipo_prese", default)]
    pub plug_type: Option<Text>,
    #[serde(rename = "adattatore_necessario", default)]
    pub adapter_needed: Option<bool>,
    #[serde(default)]
    pub note: Option<Text>,
    #[serde(rename = "consigli", default, deserialize_with = "list_skip_nulls")]
    pub tips: Vec<Text>,
}

// ---------------------------------------------------------------------------
// Internet / SIM

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InternetSim {
    #[serde(rename = "operatore_unico", default)]
    pub carrier: Option<Text>,
    #[serde(rename = "sim_turisti", default)]
    pub tourist_sim: Option<TouristSim>,
    #[serde(rename = "wifi_pubblico", default)]
    pub public_wifi: Option<PublicWifi>,
    #[serde(rename = "consigli", default, deserialize_with = "list_skip_nulls")]
    pub tips: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TouristSim {
    #[serde(rename = "opzioni", default, deserialize_with = "list_skip_nulls")]
    pub options: Vec<SimOption>,
    #[serde(rename = "dove_comprare", default, deserialize_with = "list_skip_nulls")]
    pub where_to_buy: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimOption {
    #[serde(rename = "nome", default)]
    pub name: Option<Text>,
    #[serde(rename = "durata", default)]
    pub duration: Option<Text>,
    #[serde(rename = "dati", default)]
    pub data: Option<Text>,
    #[serde(rename = "minuti", default)]
    pub minutes: Option<Text>,
    #[serde(default)]
    pub sms: Option<Text>,
    #[serde(default)]
    pub extra: Option<Text>,
    #[serde(rename = "costo_indicativo", default)]
    pub indicative_cost: Option<Text>,
    #[serde(rename = "estendibile", default)]
    pub extensible: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicWifi {
    #[serde(rename = "disponibilita", default)]
    pub availability: Option<Text>,
    #[serde(rename = "come_riconoscere", default)]
    pub how_to_recognize: Option<Text>,
}

// ---------------------------------------------------------------------------
// Currency / payments

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrencyPayments {
    #[serde(rename = "moneta_ufficiale", default)]
    pub official_currency: Option<OfficialCurrency>,
    #[serde(rename = "carte_accettate", default)]
    pub cards: Option<AcceptedCards>,
    #[serde(rename = "dove_cambiare", default, deserialize_with = "list_skip_nulls")]
    pub exchange_venues: Vec<ExchangeVenue>,
    #[serde(rename = "consigli_pratici", default, deserialize_with = "list_skip_nulls")]
    pub advice: Vec<Text>,
    #[serde(rename = "budget_indicativo", default)]
    pub indicative_budget: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfficialCurrency {
    #[serde(rename = "nome", default)]
    pub name: Option<Text>,
    #[serde(rename = "simbolo", default)]
    pub symbol: Option<Text>,
    #[serde(rename = "cambio_ufficiale", default)]
    pub official_rate: Option<Text>,
    #[serde(default)]
    pub note: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcceptedCards {
    #[serde(rename = "funzionano", default, deserialize_with = "list_skip_nulls")]
    pub working: Vec<Text>,
    #[serde(rename = "non_funzionano", default, deserialize_with = "list_skip_nulls")]
    pub not_working: Vec<Text>,
    #[serde(rename = "commissioni", default)]
    pub fees: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExchangeVenue {
    #[serde(rename = "luogo", default)]
    pub place: Option<Text>,
    #[serde(rename = "consigliato", default)]
    pub recommended: Option<bool>,
    #[serde(rename = "cambio", default)]
    pub rate: Option<Text>,
    #[serde(rename = "commissione", default)]
    pub fee: Option<Text>,
    #[serde(default)]
    pub note: Option<Text>,
    #[serde(rename = "avviso", default)]
    pub warning: Option<Text>,
}

// ---------------------------------------------------------------------------
// Transport

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transport {
    #[serde(default)]
    pub taxi: Option<Taxi>,
    #[serde(rename = "autobus", default)]
    pub bus: Option<Bus>,
    #[serde(rename = "noleggio_auto", default)]
    pub car_rental: Option<CarRental>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Taxi {
    #[serde(rename = "tipi", default, deserialize_with = "list_skip_nulls")]
    pub types: Vec<TaxiType>,
    #[serde(rename = "consigli", default, deserialize_with = "list_skip_nulls")]
    pub tips: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxiType {
    #[serde(rename = "nome", default)]
    pub name: Option<Text>,
    #[serde(rename = "caratteristiche", default)]
    pub characteristics: Option<Text>,
    #[serde(rename = "costo", default)]
    pub cost: Option<Text>,
    #[serde(default)]
    pub note: Option<Text>,
    #[serde(rename = "dove_trovarli", default)]
    pub where_to_find: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bus {
    /// The single intercity operator
    #[serde(rename = "viazul", default)]
    pub intercity: Option<BusOperator>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusOperator {
    #[serde(rename = "descrizione", default)]
    pub description: Option<Text>,
    #[serde(rename = "caratteristiche", default)]
    pub characteristics: Option<Text>,
    #[serde(rename = "prenotazione", default)]
    pub booking: Option<Text>,
    #[serde(rename = "costo", default)]
    pub cost: Option<Text>,
    #[serde(default)]
    pub note: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarRental {
    #[serde(rename = "compagnie", default, deserialize_with = "list_skip_nulls")]
    pub companies: Vec<Text>,
    #[serde(rename = "costo", default)]
    pub cost: Option<Text>,
    #[serde(rename = "requisiti", default, deserialize_with = "list_skip_nulls")]
    pub requirements: Vec<Text>,
    #[serde(rename = "consigli", default, deserialize_with = "list_skip_nulls")]
    pub tips: Vec<Text>,
}

// ---------------------------------------------------------------------------
// Embassy

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embassy {
    #[serde(rename = "nome", default)]
    pub name: Option<Text>,
    #[serde(rename = "indirizzo", default)]
    pub address: Option<Text>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<Text>,
    #[serde(rename = "email_consolare", default)]
    pub consular_email: Option<Text>,
    #[serde(rename = "sito_web", default)]
    pub website: Option<Text>,
    #[serde(rename = "orari", default)]
    pub hours: Option<OfficeHours>,
    #[serde(rename = "servizi", default, deserialize_with = "list_skip_nulls")]
    pub services: Vec<Text>,
    #[serde(rename = "emergenza_24h", default)]
    pub emergency_24h: Option<Text>,
    #[serde(rename = "consigli", default, deserialize_with = "list_skip_nulls")]
    pub tips: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfficeHours {
    /// Monday hours, shown as the weekday schedule
    #[serde(rename = "lunedi", default)]
    pub monday: Option<Text>,
}

// ---------------------------------------------------------------------------
// Emergencies

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Emergencies {
    #[serde(rename = "numeri_emergenza", default, deserialize_with = "list_skip_nulls")]
    pub numbers: Vec<EmergencyNumber>,
    #[serde(rename = "assistenza_turistica", default)]
    pub tourist_assistance: Option<TouristAssistance>,
    #[serde(rename = "consigli_sicurezza", default, deserialize_with = "list_skip_nulls")]
    pub safety_tips: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmergencyNumber {
    #[serde(rename = "icona", default)]
    pub icon: Option<Text>,
    #[serde(rename = "servizio", default)]
    pub service: Option<Text>,
    #[serde(rename = "numero", default)]
    pub number: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TouristAssistance {
    #[serde(rename = "nome", default)]
    pub name: Option<Text>,
    #[serde(rename = "descrizione", default)]
    pub description: Option<Text>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<Text>,
    #[serde(rename = "servizi", default, deserialize_with = "list_skip_nulls")]
    pub services: Vec<Text>,
}

// ---------------------------------------------------------------------------
// Health

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Health {
    #[serde(rename = "assicurazione_obbligatoria", default)]
    pub mandatory_insurance: Option<Insurance>,
    #[serde(rename = "medicinali_da_portare", default, deserialize_with = "list_skip_nulls")]
    pub medicines: Vec<Text>,
    #[serde(rename = "acqua_cibo", default)]
    pub water_food: Option<WaterFood>,
    #[serde(rename = "vaccinazioni", default)]
    pub vaccinations: Option<Vaccinations>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Insurance {
    #[serde(rename = "descrizione", default)]
    pub description: Option<Text>,
    #[serde(rename = "copertura_minima", default)]
    pub minimum_coverage: Option<Text>,
    #[serde(rename = "costo_indicativo", default)]
    pub indicative_cost: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaterFood {
    #[serde(rename = "acqua", default)]
    pub water: Option<Text>,
    #[serde(rename = "ghiaccio", default)]
    pub ice: Option<Text>,
    #[serde(rename = "frutta", default)]
    pub fruit: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Vaccinations {
    #[serde(rename = "obbligatorie", default)]
    pub mandatory: Option<Text>,
    #[serde(rename = "consigliate", default, deserialize_with = "list_skip_nulls")]
    pub recommended: Vec<Text>,
}

// ---------------------------------------------------------------------------
// Practical advice

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PracticalAdvice {
    #[serde(rename = "truffe_comuni", default, deserialize_with = "list_skip_nulls")]
    pub scams: Vec<Scam>,
    #[serde(rename = "cosa_non_fare", default, deserialize_with = "list_skip_nulls")]
    pub do_not: Vec<Text>,
    #[serde(rename = "cosa_portare", default, deserialize_with = "list_skip_nulls")]
    pub bring: Vec<Text>,
    #[serde(rename = "mance", default)]
    pub tipping: Option<Tipping>,
    #[serde(rename = "lingua", default)]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scam {
    #[serde(rename = "tipo", default)]
    pub kind: Option<Text>,
    #[serde(rename = "descrizione", default)]
    pub description: Option<Text>,
    #[serde(rename = "come_evitare", default)]
    pub how_to_avoid: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tipping {
    #[serde(rename = "ristoranti", default)]
    pub restaurants: Option<Text>,
    #[serde(default)]
    pub taxi: Option<Text>,
    #[serde(rename = "guide_turistiche", default)]
    pub tour_guides: Option<Text>,
    #[serde(default)]
    pub hotel: Option<Text>,
    #[serde(default)]
    pub note: Option<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Language {
    #[serde(rename = "ufficiale", default)]
    pub official: Option<Text>,
    #[serde(rename = "inglese", default)]
    pub english: Option<Text>,
    #[serde(rename = "consiglio", default)]
    pub advice: Option<Text>,
}
