//! Element/oxide lookup tables.

/// (oxide, element) pairs for the oxides reported in rock analyses.
pub const OXIDE_TO_ELEMENT: &[(&str, &str)] = &[
    ("SiO2", "SI"),
    ("TiO2", "TI"),
    ("Al2O3", "AL"),
    ("FeO", "FE"),
    ("MnO", "MN"),
    ("MgO", "MG"),
    ("CaO", "CA"),
    ("Na2O", "NA"),
    ("K2O", "K"),
    ("P2O5", "P"),
    ("H2O", "H"),
];

/// Molar masses in g/mol.
pub const MOLAR_MASS: &[(&str, f64)] = &[
    ("O", 15.9994),
    ("SI", 28.0855),
    ("TI", 47.867),
    ("AL", 26.98154),
    ("FE", 55.845),
    ("MG", 24.305),
    ("MN", 54.93805),
    ("CA", 40.078),
    ("NA", 22.98977),
    ("K", 39.0983),
    ("H", 1.00794),
];

/// Element mass fraction of its oxide.
pub const ELEMENT_TO_OXIDE_RATIO: &[(&str, f64)] = &[
    ("SI", 0.467434921),
    ("TI", 0.599342898),
    ("AL", 0.529250712),
    ("FE", 0.777304842),
    ("MG", 0.603035897),
    ("MN", 0.774457638),
    ("CA", 0.714690767),
    ("NA", 0.741857476),
    ("K", 0.830147777),
    ("H", 0.111898344),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

pub fn oxide_of(element: &str) -> Option<&'static str> {
    OXIDE_TO_ELEMENT
        .iter()
        .find(|(_, el)| *el == element)
        .map(|(oxide, _)| *oxide)
}

pub fn element_of(oxide: &str) -> Option<&'static str> {
    lookup(OXIDE_TO_ELEMENT, oxide)
}

pub fn molar_mass(element: &str) -> Option<f64> {
    lookup(MOLAR_MASS, element)
}

pub fn oxide_ratio(element: &str) -> Option<f64> {
    lookup(ELEMENT_TO_OXIDE_RATIO, element)
}
