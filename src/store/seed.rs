//! Demo catalog used by the in-memory backend.
//!
//! Ids are fixed so links into the demo catalog survive restarts.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    Bouquet, ColorOption, ComplementOption, ComplementType, CustomizationOptions, FlowerOption,
    SizeOption,
};

const BOUQUET_BASE: u128 = 0xb0;
const FLOWER_BASE: u128 = 0xf100;
const COLOR_BASE: u128 = 0xc100;
const SIZE_BASE: u128 = 0x5100;
const COMPLEMENT_BASE: u128 = 0xc900;

fn brl(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

pub fn bouquets() -> Vec<Bouquet> {
    let rows: [(&str, &str, &str, i64, [&str; 2], &str, bool, bool, (u32, u32)); 6] = [
        (
            "Encanto Rosa",
            "Um buquê deslumbrante com rosas cor-de-rosa de primeira qualidade, cuidadosamente arranjadas para transmitir amor e carinho.",
            "Rosas cor-de-rosa de primeira qualidade, perfeitas para demonstrar amor.",
            14990,
            [
                "https://images.unsplash.com/photo-1494972308805-463bc619d34e?w=800",
                "https://images.unsplash.com/photo-1518621736915-f3b1c41bfd00?w=800",
            ],
            "Romântico",
            true,
            true,
            (1, 15),
        ),
        (
            "Jardim Tropical",
            "Uma explosão de cores vibrantes com flores tropicais exóticas.",
            "Flores tropicais coloridas que trazem alegria e energia.",
            18990,
            [
                "https://images.unsplash.com/photo-1487530811176-3780de880c2d?w=800",
                "https://images.unsplash.com/photo-1561181286-d3fee7d55364?w=800",
            ],
            "Tropical",
            true,
            true,
            (1, 20),
        ),
        (
            "Elegância Branca",
            "Pureza e sofisticação em um único buquê de lírios, rosas brancas e gérberas.",
            "Lírios e rosas brancas que transmitem paz e elegância.",
            21990,
            [
                "https://images.unsplash.com/photo-1563241527-3004b7be0ffd?w=800",
                "https://images.unsplash.com/photo-1522057306606-8d84dea71d49?w=800",
            ],
            "Clássico",
            true,
            true,
            (2, 1),
        ),
        (
            "Paixão Vermelha",
            "O clássico buquê de rosas vermelhas, símbolo universal do amor apaixonado.",
            "Rosas vermelhas clássicas, o símbolo do amor verdadeiro.",
            16990,
            [
                "https://images.unsplash.com/photo-1548198471-e5667a4a58a2?w=800",
                "https://images.unsplash.com/photo-1455659817273-f96807779a8a?w=800",
            ],
            "Romântico",
            false,
            false,
            (2, 10),
        ),
        (
            "Campo de Girassóis",
            "Alegria em forma de flores! Girassóis que irradiam energia positiva.",
            "Girassóis radiantes que trazem felicidade e energia.",
            12990,
            [
                "https://images.unsplash.com/photo-1597848212624-a19eb35e2651?w=800",
                "https://images.unsplash.com/photo-1578923813614-76cf9a24f2ed?w=800",
            ],
            "Alegre",
            true,
            false,
            (2, 15),
        ),
        (
            "Mix Primavera",
            "Margaridas, crisântemos e astromélias em tons pastéis.",
            "Flores mistas em tons pastéis, perfeitas para qualquer ocasião.",
            13990,
            [
                "https://images.unsplash.com/photo-1525310072745-f49212b5ac6d?w=800",
                "https://images.unsplash.com/photo-1490750967868-88aa4486c946?w=800",
            ],
            "Misto",
            true,
            false,
            (2, 20),
        ),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(i, (name, description, short, cents, images, category, customizable, featured, (m, d)))| {
                Bouquet {
                    id: Uuid::from_u128(BOUQUET_BASE + i as u128 + 1),
                    name: name.to_string(),
                    description: description.to_string(),
                    short_description: short.to_string(),
                    price: brl(cents),
                    images: images.iter().map(|s| s.to_string()).collect(),
                    category: category.to_string(),
                    allows_customization: customizable,
                    featured,
                    active: true,
                    display_order: i as i32 + 1,
                    created_at: day(2024, m, d),
                }
            },
        )
        .collect()
}

pub fn customization_options() -> CustomizationOptions {
    let flowers = [
        ("Rosa", 1290, true),
        ("Lírio", 1590, true),
        ("Girassol", 990, true),
        ("Orquídea", 2490, true),
        ("Tulipa", 1890, true),
        ("Margarida", 690, true),
        ("Gérbera", 890, true),
        ("Crisântemo", 790, false),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, cents, active))| FlowerOption {
        id: Uuid::from_u128(FLOWER_BASE + i as u128 + 1),
        name: name.to_string(),
        price: brl(cents),
        active,
        display_order: i as i32 + 1,
    })
    .collect();

    let colors = [
        ("Rosa", "#F4C2C2", 0, true),
        ("Vermelho", "#DC143C", 0, true),
        ("Branco", "#FFFFFF", 0, true),
        ("Amarelo", "#FFD700", 0, true),
        ("Laranja", "#FF8C00", 0, true),
        ("Lilás", "#C8A2C8", 500, true),
        ("Coral", "#FF7F50", 500, false),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, hex, cents, active))| ColorOption {
        id: Uuid::from_u128(COLOR_BASE + i as u128 + 1),
        name: name.to_string(),
        hex_code: hex.to_string(),
        price: brl(cents),
        active,
        display_order: i as i32 + 1,
    })
    .collect();

    let sizes = [
        ("Pequeno", 9990, 0),
        ("Médio", 14990, 5000),
        ("Grande", 19990, 10000),
        ("Luxo", 29990, 20000),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, cents, modifier))| SizeOption {
        id: Uuid::from_u128(SIZE_BASE + i as u128 + 1),
        name: name.to_string(),
        price: brl(cents),
        price_modifier: brl(modifier),
        active: true,
        display_order: i as i32 + 1,
    })
    .collect();

    let complements = [
        ("Laço de Cetim", ComplementType::Ribbon, 890, true),
        ("Laço de Organza", ComplementType::Ribbon, 1290, true),
        ("Papel Kraft", ComplementType::Wrapping, 590, true),
        ("Celofane Transparente", ComplementType::Wrapping, 490, true),
        ("Cartão Personalizado", ComplementType::Card, 990, true),
        ("Cartão com Mensagem", ComplementType::Card, 690, true),
        ("Chocolate Belga", ComplementType::Other, 2990, true),
        ("Urso de Pelúcia", ComplementType::Other, 3990, false),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, complement_type, cents, active))| ComplementOption {
        id: Uuid::from_u128(COMPLEMENT_BASE + i as u128 + 1),
        name: name.to_string(),
        complement_type,
        price: brl(cents),
        active,
        display_order: i as i32 + 1,
    })
    .collect();

    CustomizationOptions {
        flowers,
        colors,
        sizes,
        complements,
    }
}
