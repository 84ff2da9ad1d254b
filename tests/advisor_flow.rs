use anyhow::Result;
use tempfile::tempdir;

use shoe_advisor::classify::classify;
use shoe_advisor::columns::resolve_output_columns;
use shoe_advisor::export;
use shoe_advisor::filter::{
    apply_filters, AnswerSet, DistanceAnswer, FrequencyAnswer, GenderAnswer, GoalAnswer,
    SurfaceAnswer, YesNoAnswer,
};
use shoe_advisor::source::load_catalog_from_path;

/// A sixteen-column catalog CSV in the shape the spreadsheet exports: the
/// seven classification columns are headed "1".."7", the rest carry display
/// data (brand at B, model at C, and so on out to column P).
fn catalog_csv() -> String {
    let header = "1,Brand,Model,2,3,4,5,H7,6,7,Weight,Drop,Cushion,Plate,Price,Stock";
    let rows = [
        // matches the full strict answer set
        "Erkek,Asics,Alpha,Yol,Antrenman,Uzun Ömürlü,Orta Mesafe,x,1.2,Evet,250g,8mm,high,no,120,9",
        // female trail racer, short distance
        "Kadin,Nike,Beta,Patika,YARIŞ,Standart,Kısa Mesafe,x,Hayır,Hayır,210g,4mm,low,yes,180,3",
        // injury cell is unparseable text with no keyword
        "Erkek,Puma,Gamma,Yol,Antrenman,Uzun Ömür,Uzun Mesafe,x,Hayır,1,290g,10mm,mid,no,90,0",
    ];
    format!("{header}\n{}\n", rows.join("\n"))
}

fn strict_male_answers() -> AnswerSet {
    AnswerSet {
        gender: GenderAnswer::Male,
        surface: SurfaceAnswer::Road,
        goal: GoalAnswer::Training,
        frequency: FrequencyAnswer::High,
        distance: DistanceAnswer::High,
        injury: YesNoAnswer::Yes,
        pronation: YesNoAnswer::Yes,
    }
}

#[test]
fn full_flow_from_csv_to_export() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.csv");
    std::fs::write(&path, catalog_csv())?;

    let table = load_catalog_from_path(&path)?;
    assert_eq!(table.row_count(), 3);

    let classified = classify(&table);
    let result = apply_filters(&classified, &strict_male_answers());
    assert_eq!(result.row_count(), 1);

    let display = resolve_output_columns(&table);
    // B C D H K L M N O P -> the non-classification columns
    assert_eq!(
        display,
        vec!["Brand", "Model", "2", "H7", "Weight", "Drop", "Cushion", "Plate", "Price", "Stock"]
    );

    let projected = result.project(&display);
    let csv = export::to_csv_string(&projected)?;
    assert!(csv.contains("Asics,Alpha"));
    assert!(!csv.contains("Nike"));

    let out = dir.path().join("out.csv");
    export::write_csv(&projected, &out)?;
    assert!(out.exists());
    Ok(())
}

#[test]
fn relaxing_constraints_grows_or_keeps_the_result() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.csv");
    std::fs::write(&path, catalog_csv())?;
    let classified = classify(&load_catalog_from_path(&path)?);

    let strict = apply_filters(&classified, &strict_male_answers());
    let relaxed_answers = AnswerSet {
        frequency: FrequencyAnswer::Low,
        distance: DistanceAnswer::Low,
        injury: YesNoAnswer::No,
        pronation: YesNoAnswer::No,
        ..strict_male_answers()
    };
    let relaxed = apply_filters(&classified, &relaxed_answers);
    assert!(relaxed.row_count() >= strict.row_count());
    // Gamma's injury cell is "Hayır": dropped under injury=yes, kept here
    assert_eq!(relaxed.row_count(), 2);
    Ok(())
}

#[test]
fn injury_text_fallback_excludes_unsuitable_shoes() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.csv");
    std::fs::write(&path, catalog_csv())?;
    let classified = classify(&load_catalog_from_path(&path)?);

    let answers = AnswerSet {
        frequency: FrequencyAnswer::Low,
        distance: DistanceAnswer::Low,
        pronation: YesNoAnswer::No,
        ..strict_male_answers()
    };
    let result = apply_filters(&classified, &answers);
    // only Alpha carries the 1.2 injury code; Gamma's "Hayır" fails the
    // keyword fallback
    assert_eq!(result.row_count(), 1);
    Ok(())
}

#[test]
fn female_trail_race_selection() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.csv");
    std::fs::write(&path, catalog_csv())?;
    let classified = classify(&load_catalog_from_path(&path)?);

    let answers = AnswerSet {
        gender: GenderAnswer::Female,
        surface: SurfaceAnswer::Trail,
        goal: GoalAnswer::Race,
        frequency: FrequencyAnswer::Low,
        distance: DistanceAnswer::Low,
        injury: YesNoAnswer::No,
        pronation: YesNoAnswer::No,
    };
    let result = apply_filters(&classified, &answers);
    assert_eq!(result.row_count(), 1);
    Ok(())
}

#[test]
fn empty_catalog_filters_to_an_empty_result() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.csv");
    std::fs::write(&path, "1,2,3,4,5,6,7\n")?;
    let table = load_catalog_from_path(&path)?;
    let result = apply_filters(&classify(&table), &strict_male_answers());
    assert!(result.is_empty());
    Ok(())
}

#[test]
fn narrow_catalog_drops_out_of_range_display_letters() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("catalog.csv");
    std::fs::write(&path, "1,Brand,Model,2,3\nErkek,Asics,Alpha,Yol,Antrenman\n")?;
    let table = load_catalog_from_path(&path)?;
    // only five columns: H (8th) through P fall away
    assert_eq!(resolve_output_columns(&table), vec!["Brand", "Model", "2"]);
    Ok(())
}
