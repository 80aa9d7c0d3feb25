use emily_idle_core::settings::{Settings, Tab, ThemeMode};

#[test]
fn missing_or_unreadable_settings_use_defaults() {
    assert_eq!(Settings::load(None), Settings::default());
    assert_eq!(Settings::load(Some("")), Settings::default());
    assert_eq!(Settings::load(Some("{\"themeMode\": 7")), Settings::default());
    assert_eq!(Settings::load(Some("[]")), Settings::default());
}

#[test]
fn partial_settings_fill_in_defaults() {
    let settings = Settings::load(Some(r#"{"themeMode":"dark"}"#));
    assert_eq!(settings.theme_mode, ThemeMode::Dark);
    assert!(!settings.hide_completed_achievements);
    assert_eq!(settings.visible_tabs(), Tab::ALL.to_vec());
}

#[test]
fn one_bad_field_keeps_the_others() {
    let settings = Settings::load(Some(r#"{"themeMode":"sepia","hiddenTabs":["catalog"]}"#));
    assert_eq!(settings.theme_mode, ThemeMode::System);
    assert!(!settings.visible_tabs().contains(&Tab::Catalog));

    let settings = Settings::load(Some(
        r#"{"themeMode":"dark","hideCompletedAchievements":"yes","coachmarksDismissed":{"intro":true}}"#,
    ));
    assert_eq!(settings.theme_mode, ThemeMode::Dark);
    assert!(!settings.hide_completed_achievements);
    assert!(settings.is_coachmark_dismissed("intro"));
}

#[test]
fn hidden_tabs_drop_out_of_the_shell() {
    let mut settings = Settings::default();
    settings.hide_tab(Tab::Catalog);
    let visible = settings.visible_tabs();
    assert_eq!(visible.len(), 8);
    assert!(!visible.contains(&Tab::Catalog));

    settings.show_tab(Tab::Catalog);
    assert_eq!(settings.visible_tabs().len(), 9);
}

#[test]
fn unknown_hidden_tab_ids_are_ignored() {
    let settings = Settings::load(Some(r#"{"hiddenTabs":["casino","maison"]}"#));
    assert_eq!(settings.visible_tabs().len(), 8);
    assert!(!settings.visible_tabs().contains(&Tab::Maison));
}

#[test]
fn settings_round_trip_through_json() {
    let mut settings = Settings::default();
    settings.cycle_theme();
    settings.hide_completed_achievements = true;
    settings.hide_tab(Tab::Career);
    settings.dismiss_coachmark("nostalgia-intro");

    let json = settings.to_json().expect("encode");
    assert!(json.contains(r#""themeMode":"light""#));
    assert_eq!(Settings::load(Some(&json)), settings);
}
