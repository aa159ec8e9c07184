//! Customer case-study catalog and its listing filters.

use tracing::debug;

use median_contracts::case_study::{CaseStudy, CaseStudyCategory};

#[allow(clippy::too_many_arguments)]
fn study(
    slug: &str,
    title: &str,
    hospital: &str,
    city: &str,
    category: CaseStudyCategory,
    products: &[&str],
    year: u16,
    headline_metric: &str,
) -> CaseStudy {
    CaseStudy {
        slug: slug.to_string(),
        title: title.to_string(),
        hospital: hospital.to_string(),
        city: city.to_string(),
        category,
        products: products.iter().map(|p| p.to_string()).collect(),
        year,
        headline_metric: headline_metric.to_string(),
    }
}

/// The published case studies.
pub fn case_studies() -> Vec<CaseStudy> {
    use CaseStudyCategory::*;

    vec![
        study(
            "ankara-city-hbys",
            "Unifying 3,700 beds on one HBYS",
            "Ankara Bilkent City Hospital",
            "Ankara",
            Hospital,
            &["Median HBYS", "Median PACS"],
            2024,
            "41% faster discharge paperwork",
        ),
        study(
            "izmir-pharmacy-queue",
            "Cutting the outpatient pharmacy queue",
            "Ege University Hospital",
            "İzmir",
            Pharmacy,
            &["Median Pharmacy", "Median HBYS"],
            2025,
            "38% shorter pharmacy queue",
        ),
        study(
            "bursa-lab-automation",
            "Barcode-to-result lab automation",
            "Bursa Yüksek İhtisas Hospital",
            "Bursa",
            Laboratory,
            &["Median LIS"],
            2023,
            "Turnaround time down from 4h to 90min",
        ),
        study(
            "istanbul-medula-rejections",
            "Halving Medula provision rejections",
            "Kartal Dr. Lütfi Kırdar Hospital",
            "İstanbul",
            Insurance,
            &["Median Medula Gateway", "Median HBYS"],
            2025,
            "52% fewer rejected provisions",
        ),
        study(
            "antalya-clinic-scheduling",
            "Same-day booking for a clinic network",
            "Akdeniz Family Clinics",
            "Antalya",
            Clinic,
            &["Median Scheduling"],
            2024,
            "No-show rate down to 6%",
        ),
        study(
            "konya-radiology-ai",
            "AI triage for emergency head CT",
            "Konya City Hospital",
            "Konya",
            Hospital,
            &["Median PACS", "Median AI Registry"],
            2026,
            "Critical findings flagged in under 3 minutes",
        ),
        study(
            "trabzon-controlled-substances",
            "Closing the loop on controlled substances",
            "Karadeniz Technical University Hospital",
            "Trabzon",
            Pharmacy,
            &["Median Pharmacy"],
            2023,
            "Zero unreconciled opioid counts in 12 months",
        ),
        study(
            "gaziantep-lab-referrals",
            "Regional reference-lab referrals",
            "Gaziantep Central Laboratory",
            "Gaziantep",
            Laboratory,
            &["Median LIS", "Median Medula Gateway"],
            2025,
            "3x more referral samples per technician",
        ),
    ]
}

/// Studies in the category named `category_name`; unknown names yield an
/// empty vector.
pub fn case_studies_by_category(studies: &[CaseStudy], category_name: &str) -> Vec<CaseStudy> {
    match category_name.parse::<CaseStudyCategory>() {
        Ok(category) => studies.iter().filter(|s| s.category == category).cloned().collect(),
        Err(e) => {
            debug!(error = %e, "case study filter matched nothing");
            Vec::new()
        }
    }
}

/// Case-insensitive search over title, hospital, and city.
pub fn search_case_studies(studies: &[CaseStudy], query: &str) -> Vec<CaseStudy> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return studies.to_vec();
    }
    studies
        .iter()
        .filter(|s| {
            s.title.to_lowercase().contains(&needle)
                || s.hospital.to_lowercase().contains(&needle)
                || s.city.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Studies that deployed `product` (case-insensitive exact name).
pub fn case_studies_for_product(studies: &[CaseStudy], product: &str) -> Vec<CaseStudy> {
    let wanted = product.trim();
    studies
        .iter()
        .filter(|s| s.products.iter().any(|p| p.eq_ignore_ascii_case(wanted)))
        .cloned()
        .collect()
}
