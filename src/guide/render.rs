//! Guide section formatters
//!
//! One formatter per section key. Each one reads its content shape and emits
//! blocks in a fixed order; anything absent in the data is simply left out.

use crate::core::fragment::{present, Blocks, Column, Fragment, GridCell, Tone};
use crate::guide::model::*;

/// Text shown for a section whose key is not known yet
pub const PLACEHOLDER: &str = "Sezione in costruzione";

const TIPS: &str = "Consigli";

/// Label for the adapter-needed flag
pub fn adapter_label(needed: bool) -> &'static str {
    if needed {
        "✅ SÌ"
    } else {
        "❌ NO"
    }
}

/// Render every section of the guide, in document order
pub fn render_guide(guide: &Guide) -> Vec<Fragment> {
    guide.sections.iter().map(render_section).collect()
}

/// Render one section
pub fn render_section(section: &Section) -> Fragment {
    let blocks = match &section.content {
        SectionContent::Electricity(c) => electricity(c),
        SectionContent::InternetSim(c) => internet_sim(c),
        SectionContent::CurrencyPayments(c) => currency_payments(c),
        SectionContent::Transport(c) => transport(c),
        SectionContent::Embassy(c) => embassy(c),
        SectionContent::Emergencies(c) => emergencies(c),
        SectionContent::Health(c) => health(c),
        SectionContent::PracticalAdvice(c) => practical_advice(c),
        SectionContent::Unrecognized { key } => {
            tracing::debug!(key = key.as_str(), "no formatter for section");
            let mut blocks = Blocks::new();
            blocks.note(Tone::Muted, Some(PLACEHOLDER));
            blocks
        }
    };

    Fragment::new(section.title.as_str(), section.icon.as_deref(), blocks)
}

fn text(value: &Option<Text>) -> Option<&str> {
    value.as_deref()
}

/// Non-blank values joined with a separator, or None when there are none
fn joined(parts: &[Option<String>], separator: &str) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.trim().is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(separator))
}

fn labelled(label: &str, value: &Option<Text>) -> Option<String> {
    text(value)
        .filter(|v| !v.trim().is_empty())
        .map(|v| format!("{}: {}", label, v))
}

fn prefixed(prefix: &str, value: &Option<Text>) -> Option<String> {
    text(value)
        .filter(|v| !v.trim().is_empty())
        .map(|v| format!("{} {}", prefix, v))
}

fn tips(blocks: &mut Blocks, items: &[Text]) {
    blocks.titled_list(Some("💡"), TIPS, items);
}

fn electricity(c: &Electricity) -> Blocks {
    let mut blocks = Blocks::new();
    blocks
        .banner(Tone::Danger, prefixed("⚠️", &c.warning))
        .field("Voltaggio", text(&c.voltage))
        .field("Tipo prese", text(&c.plug_type))
        .field("Adattatore necessario", c.adapter_needed.map(adapter_label))
        .note(Tone::Neutral, text(&c.note));
    tips(&mut blocks, &c.tips);
    blocks
}

fn sim_option(option: &SimOption) -> Blocks {
    let mut body = Blocks::new();
    body.note(
        Tone::Muted,
        joined(
            &[
                labelled("Durata", &option.duration),
                labelled("Dati", &option.data),
                labelled("Minuti", &option.minutes),
                labelled("SMS", &option.sms),
            ],
            " | ",
        ),
    )
    .note(Tone::Neutral, prefixed("✨", &option.extra))
    .field("Costo indicativo", text(&option.indicative_cost))
    .note(Tone::Muted, text(&option.extensible));
    body
}

fn internet_sim(c: &InternetSim) -> Blocks {
    let mut blocks = Blocks::new();
    blocks.field("Operatore unico", text(&c.carrier));

    if let Some(sim) = &c.tourist_sim {
        if !sim.options.is_empty() {
            blocks.heading(Some("📱"), "SIM Card per Turisti");
            for option in &sim.options {
                blocks.card(Tone::Info, text(&option.name), sim_option(option));
            }
        }
        blocks.titled_list(Some("📍"), "Dove comprare", &sim.where_to_buy);
    }

    if let Some(wifi) = &c.public_wifi {
        let mut body = Blocks::new();
        body.note(Tone::Neutral, text(&wifi.availability))
            .field("Come riconoscere", text(&wifi.how_to_recognize));
        if !body.is_empty() {
            blocks.heading(Some("📶"), "WiFi Pubblico");
            for block in body.into_vec() {
                blocks.push(block);
            }
        }
    }

    tips(&mut blocks, &c.tips);
    blocks
}

fn currency_name(currency: &OfficialCurrency) -> Option<String> {
    let name = text(&currency.name).filter(|n| !n.trim().is_empty())?;
    Some(match text(&currency.symbol).filter(|s| !s.trim().is_empty()) {
        Some(symbol) => format!("{} ({})", name, symbol),
        None => name.to_string(),
    })
}

fn exchange_venue(venue: &ExchangeVenue) -> (Tone, Blocks) {
    let recommended = venue.recommended == Some(true);
    let mut body = Blocks::new();
    if recommended {
        body.badge(Tone::Success, "✅ Consigliato");
    }

    let fee = text(&venue.fee)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or("N/D");
    let rate = text(&venue.rate).filter(|r| !r.trim().is_empty());
    body.note(
        Tone::Neutral,
        rate.map(|rate| format!("Cambio: {} | Commissione: {}", rate, fee))
            .or_else(|| Some(format!("Commissione: {}", fee))),
    )
    .note(Tone::Muted, text(&venue.note))
    .note(Tone::Danger, text(&venue.warning));

    let tone = if recommended { Tone::Success } else { Tone::Neutral };
    (tone, body)
}

fn currency_payments(c: &CurrencyPayments) -> Blocks {
    let mut blocks = Blocks::new();

    if let Some(currency) = &c.official_currency {
        let mut body = Blocks::new();
        body.field("Moneta ufficiale", currency_name(currency))
            .field("Cambio", text(&currency.official_rate))
            .note(Tone::Muted, text(&currency.note));
        blocks.panel(Tone::Info, "Moneta", body);
    }

    if let Some(cards) = &c.cards {
        let mut body = Blocks::new();
        body.columns(vec![
            Column::new("Funzionano", Tone::Success, &cards.working),
            Column::new("NON funzionano", Tone::Danger, &cards.not_working),
        ])
        .note(Tone::Muted, labelled("Commissioni", &cards.fees));
        if !body.is_empty() {
            blocks.heading(Some("💳"), "Carte Accettate");
            for block in body.into_vec() {
                blocks.push(block);
            }
        }
    }

    if !c.exchange_venues.is_empty() {
        blocks.heading(Some("🏦"), "Dove Cambiare");
        for venue in &c.exchange_venues {
            let (tone, body) = exchange_venue(venue);
            blocks.card(tone, text(&venue.place), body);
        }
    }

    let mut advice = Blocks::new();
    advice.list(None, &c.advice);
    blocks
        .panel(Tone::Danger, "💡 Consigli Pratici", advice)
        .field("Budget indicativo", text(&c.indicative_budget));
    blocks
}

fn taxi_type(taxi: &TaxiType) -> Blocks {
    let mut body = Blocks::new();
    body.note(Tone::Neutral, text(&taxi.characteristics))
        .field("Costo", text(&taxi.cost))
        .note(Tone::Muted, text(&taxi.note))
        .note(Tone::Neutral, prefixed("📍", &taxi.where_to_find));
    body
}

fn transport(c: &Transport) -> Blocks {
    let mut blocks = Blocks::new();

    if let Some(taxi) = &c.taxi {
        if !taxi.types.is_empty() {
            blocks.heading(Some("🚕"), "Taxi");
            for kind in &taxi.types {
                blocks.card(Tone::Info, text(&kind.name), taxi_type(kind));
            }
        }
        tips(&mut blocks, &taxi.tips);
    }

    if let Some(operator) = c.bus.as_ref().and_then(|bus| bus.intercity.as_ref()) {
        let mut body = Blocks::new();
        body.note(Tone::Neutral, text(&operator.characteristics))
            .field("Prenotazione", text(&operator.booking))
            .field("Costo", text(&operator.cost))
            .note(Tone::Muted, text(&operator.note));
        let title = text(&operator.description).filter(|d| !d.trim().is_empty());
        if title.is_some() || !body.is_empty() {
            blocks.heading(Some("🚌"), "Autobus");
            blocks.card(Tone::Info, title, body);
        }
    }

    if let Some(rental) = &c.car_rental {
        let companies: Vec<&str> = rental
            .companies
            .iter()
            .map(|company| company.as_str())
            .filter(|company| !company.trim().is_empty())
            .collect();

        let mut body = Blocks::new();
        body.field("Compagnie", (!companies.is_empty()).then(|| companies.join(", ")))
            .field("Costo", text(&rental.cost))
            .list(Some("Requisiti"), &rental.requirements);
        tips(&mut body, &rental.tips);
        if !body.is_empty() {
            blocks.heading(Some("🚗"), "Noleggio Auto");
            for block in body.into_vec() {
                blocks.push(block);
            }
        }
    }

    blocks
}

fn embassy(c: &Embassy) -> Blocks {
    let mut contact = Blocks::new();
    contact
        .note(Tone::Neutral, prefixed("📍", &c.address))
        .note(Tone::Neutral, prefixed("📞", &c.phone));

    if let Some(email) = text(&c.consular_email).filter(|e| !e.trim().is_empty()) {
        contact.link(format!("✉️ {}", email), Some(format!("mailto:{}", email)));
    }
    contact
        .link("🌐 Sito web", text(&c.website))
        .field(
            "Orari",
            c.hours
                .as_ref()
                .and_then(|hours| text(&hours.monday))
                .filter(|h| !h.trim().is_empty())
                .map(|h| format!("Lunedì-Venerdì {}", h)),
        );

    let mut blocks = Blocks::new();
    blocks.card(Tone::Info, text(&c.name), contact);
    blocks.list(Some("Servizi"), &c.services);

    let mut emergency = Blocks::new();
    emergency.note(Tone::Neutral, text(&c.emergency_24h));
    blocks.panel(Tone::Danger, "🚨 Emergenza 24h", emergency);

    tips(&mut blocks, &c.tips);
    blocks
}

fn emergencies(c: &Emergencies) -> Blocks {
    let mut blocks = Blocks::new();

    let cells: Vec<GridCell> = c
        .numbers
        .iter()
        .filter_map(|entry| {
            let piece = |field: &Option<Text>| present(text(field)).map(str::to_string);
            let cell = GridCell {
                icon: piece(&entry.icon),
                label: piece(&entry.service).unwrap_or_default(),
                value: piece(&entry.number),
            };
            (cell.icon.is_some() || !cell.label.is_empty() || cell.value.is_some()).then_some(cell)
        })
        .collect();
    blocks.grid(cells);

    if let Some(assistance) = &c.tourist_assistance {
        let mut body = Blocks::new();
        body.note(Tone::Neutral, text(&assistance.description))
            .field("Telefono", text(&assistance.phone))
            .list(Some("Servizi"), &assistance.services);

        let name = text(&assistance.name).filter(|n| !n.trim().is_empty());
        if let Some(name) = name {
            blocks.heading(Some("🏥"), name);
        }
        for block in body.into_vec() {
            blocks.push(block);
        }
    }

    let mut safety = Blocks::new();
    safety.list(None, &c.safety_tips);
    blocks.panel(Tone::Success, "💡 Consigli di Sicurezza", safety);
    blocks
}

fn health(c: &Health) -> Blocks {
    let mut blocks = Blocks::new();

    if let Some(insurance) = &c.mandatory_insurance {
        let mut body = Blocks::new();
        body.field("Copertura minima", text(&insurance.minimum_coverage))
            .field("Costo indicativo", text(&insurance.indicative_cost));
        blocks.card(Tone::Danger, prefixed("⚠️", &insurance.description), body);
    }

    blocks.titled_list(Some("💊"), "Medicinali da Portare", &c.medicines);

    if let Some(water_food) = &c.water_food {
        let mut body = Blocks::new();
        body.field("Acqua", text(&water_food.water))
            .field("Ghiaccio", text(&water_food.ice))
            .field("Frutta", text(&water_food.fruit));
        blocks.panel(Tone::Danger, "💧 Acqua e Cibo", body);
    }

    if let Some(vaccinations) = &c.vaccinations {
        let mut body = Blocks::new();
        body.field("Obbligatorie", text(&vaccinations.mandatory))
            .list(Some("Consigliate"), &vaccinations.recommended);
        if !body.is_empty() {
            blocks.heading(Some("💉"), "Vaccinazioni");
            for block in body.into_vec() {
                blocks.push(block);
            }
        }
    }

    blocks
}

fn tipping(tips: &Tipping) -> Vec<String> {
    [
        labelled("Ristoranti", &tips.restaurants),
        labelled("Taxi", &tips.taxi),
        labelled("Guide turistiche", &tips.tour_guides),
        labelled("Hotel", &tips.hotel),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn practical_advice(c: &PracticalAdvice) -> Blocks {
    let mut blocks = Blocks::new();

    if !c.scams.is_empty() {
        blocks.heading(Some("⚠️"), "Truffe Comuni da Evitare");
        for scam in &c.scams {
            let mut body = Blocks::new();
            body.note(Tone::Neutral, text(&scam.description))
                .field("Come evitare", text(&scam.how_to_avoid));
            blocks.card(Tone::Danger, text(&scam.kind), body);
        }
    }

    blocks
        .titled_list(Some("❌"), "Cosa NON Fare", &c.do_not)
        .titled_list(Some("✅"), "Cosa Portare", &c.bring);

    if let Some(tips) = &c.tipping {
        let rows = tipping(tips);
        blocks.titled_list(Some("💰"), "Mance", &rows);
        if rows.is_empty() && text(&tips.note).is_some_and(|n| !n.trim().is_empty()) {
            blocks.heading(Some("💰"), "Mance");
        }
        blocks.note(Tone::Muted, text(&tips.note));
    }

    if let Some(language) = &c.language {
        let mut body = Blocks::new();
        body.field("Ufficiale", text(&language.official))
            .field("Inglese", text(&language.english))
            .note(Tone::Muted, text(&language.advice));
        if !body.is_empty() {
            blocks.heading(Some("🗣️"), "Lingua");
            for block in body.into_vec() {
                blocks.push(block);
            }
        }
    }

    blocks
}
