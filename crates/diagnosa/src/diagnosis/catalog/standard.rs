use crate::diagnosis::domain::{Damage, DamageCode, SeverityTier, Symptom, SymptomCode};

pub(super) fn damages() -> Vec<Damage> {
    vec![
        damage(
            "KK1",
            "Power Supply Failure",
            "The PSU no longer delivers stable voltage to the system.",
            SeverityTier::Severe,
            ("Rp 350.000 - 900.000", "1 - 2 hours"),
            0.15,
            "Test the PSU with a paperclip or tester and replace it with a unit of equal or higher wattage.",
            &["G1", "G2"],
        ),
        damage(
            "KK2",
            "RAM Failure",
            "One or more memory modules are faulty or poorly seated.",
            SeverityTier::Moderate,
            ("Rp 250.000 - 800.000", "30 minutes"),
            0.12,
            "Reseat the modules, clean the contacts, run a memory test, and replace failing sticks.",
            &["G3", "G4", "G9"],
        ),
        damage(
            "KK3",
            "Hard Drive Failure",
            "The storage drive has bad sectors or a failing mechanism.",
            SeverityTier::Severe,
            ("Rp 400.000 - 1.500.000", "2 - 4 hours"),
            0.10,
            "Back up data immediately, check SMART status, and replace the drive.",
            &["G4", "G5", "G6"],
        ),
        damage(
            "KK4",
            "Processor Overheating",
            "Cooling is insufficient because of a failed fan or dried thermal paste.",
            SeverityTier::Moderate,
            ("Rp 50.000 - 300.000", "1 hour"),
            0.10,
            "Clean dust from heatsinks, reapply thermal paste, and replace the CPU fan if it stalls.",
            &["G2", "G7"],
        ),
        damage(
            "KK5",
            "Graphics Card Failure",
            "The VGA card or its memory produces corrupted output or none at all.",
            SeverityTier::Severe,
            ("Rp 800.000 - 3.500.000", "1 - 2 hours"),
            0.08,
            "Reseat the card, update drivers, test with another card, and replace if artifacts persist.",
            &["G8", "G9"],
        ),
        damage(
            "KK6",
            "Motherboard Failure",
            "Components or traces on the mainboard are damaged.",
            SeverityTier::Severe,
            ("Rp 700.000 - 2.500.000", "1 - 3 days"),
            0.05,
            "Inspect for swollen capacitors or burn marks and replace the motherboard.",
            &["G1", "G6", "G9", "G12"],
        ),
        damage(
            "KK7",
            "CMOS Battery Depleted",
            "The BIOS battery can no longer retain settings.",
            SeverityTier::Minor,
            ("Rp 15.000 - 50.000", "15 minutes"),
            0.20,
            "Replace the CR2032 battery and restore BIOS settings.",
            &["G10"],
        ),
        damage(
            "KK8",
            "Keyboard Failure",
            "Keys or the keyboard controller have stopped responding.",
            SeverityTier::Minor,
            ("Rp 150.000 - 450.000", "1 hour"),
            0.10,
            "Clean under the keycaps, check the ribbon cable, and replace the keyboard.",
            &["G11"],
        ),
    ]
}

pub(super) fn symptoms() -> Vec<Symptom> {
    vec![
        symptom(
            "G1",
            "Computer does not power on at all",
            "power",
            &[],
            &[("KK1", 0.7), ("KK6", 0.2)],
        ),
        symptom("G2", "Computer restarts on its own", "power", &[], &[("KK1", 0.4), ("KK4", 0.3)]),
        symptom("G3", "Long repeated beeps at startup", "boot", &["desktop"], &[("KK2", 0.8)]),
        symptom("G4", "Frequent blue screen errors", "system", &[], &[("KK2", 0.4), ("KK3", 0.3)]),
        symptom(
            "G5",
            "Clicking noise from the drive",
            "storage",
            &["desktop", "laptop"],
            &[("KK3", 0.75)],
        ),
        symptom("G6", "Operating system fails to load", "boot", &[], &[("KK3", 0.5), ("KK6", 0.1)]),
        symptom("G7", "Case is very hot and the fan is loud", "thermal", &[], &[("KK4", 0.8)]),
        symptom("G8", "Stripes or artifacts on the screen", "display", &[], &[("KK5", 0.7)]),
        symptom(
            "G9",
            "No display although fans spin",
            "display",
            &[],
            &[("KK5", 0.4), ("KK2", 0.3), ("KK6", 0.2)],
        ),
        symptom("G10", "Date and time reset on every boot", "boot", &[], &[("KK7", 0.85)]),
        symptom("G11", "Some keys do not respond", "input", &["laptop"], &[("KK8", 0.8)]),
        symptom("G12", "USB ports are not detected", "system", &[], &[("KK6", 0.5)]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn damage(
    code: &str,
    name: &str,
    description: &str,
    severity: SeverityTier,
    (cost_estimate, time_estimate): (&str, &str),
    prior_probability: f64,
    solution: &str,
    related: &[&str],
) -> Damage {
    Damage {
        code: DamageCode::from(code),
        name: name.to_string(),
        description: description.to_string(),
        severity,
        cost_estimate: cost_estimate.to_string(),
        time_estimate: time_estimate.to_string(),
        prior_probability,
        solution: solution.to_string(),
        related_symptoms: related.iter().map(|code| SymptomCode::from(*code)).collect(),
        updated_at: None,
    }
}

fn symptom(
    code: &str,
    name: &str,
    category: &str,
    device_types: &[&str],
    masses: &[(&str, f64)],
) -> Symptom {
    Symptom {
        code: SymptomCode::from(code),
        name: name.to_string(),
        description: String::new(),
        category: category.to_string(),
        device_types: device_types.iter().map(|kind| kind.to_string()).collect(),
        mass_function: masses
            .iter()
            .map(|(damage, mass)| (DamageCode::from(*damage), *mass))
            .collect(),
        uncertainty: None,
        updated_at: None,
    }
}
