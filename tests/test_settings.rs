use anpr_reader::settings::{
    FilePreferenceStore, MemoryPreferenceStore, PREFERENCES_FILENAME, PreferenceStore, Theme,
    ThemeSettings,
};

#[test]
fn test_default_theme_is_light() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let settings = ThemeSettings::load(FilePreferenceStore::new(dir.path()));
    assert_eq!(settings.theme(), Theme::Light);
    Ok(())
}

#[test]
fn test_theme_survives_restart() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;

    let mut settings = ThemeSettings::load(FilePreferenceStore::new(dir.path()));
    settings.set_theme(Theme::Dark)?;
    assert!(dir.path().join(PREFERENCES_FILENAME).exists());

    let reloaded = ThemeSettings::load(FilePreferenceStore::new(dir.path()));
    assert_eq!(reloaded.theme(), Theme::Dark);

    Ok(())
}

#[test]
fn test_toggle_flips_and_persists() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let mut settings = ThemeSettings::load(FilePreferenceStore::new(dir.path()));

    assert_eq!(settings.toggle()?, Theme::Dark);
    assert_eq!(settings.toggle()?, Theme::Light);
    assert_eq!(settings.store().load()?, Some(Theme::Light));

    Ok(())
}

#[test]
fn test_save_leaves_no_temp_file() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let store = FilePreferenceStore::new(dir.path());
    store.save(Theme::Dark)?;

    let names: Vec<_> = std::fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![PREFERENCES_FILENAME.to_string()]);

    let content = std::fs::read_to_string(store.path())?;
    assert!(content.contains("theme = \"dark\""));

    Ok(())
}

#[test]
fn test_corrupt_preferences_fall_back_to_default() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join(PREFERENCES_FILENAME), "theme = \"sepia\"")?;

    let store = FilePreferenceStore::new(dir.path());
    assert!(store.load().is_err());

    let settings = ThemeSettings::load(store);
    assert_eq!(settings.theme(), Theme::Light);

    Ok(())
}

#[test]
fn test_failed_save_still_changes_theme() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    // A regular file where the settings directory should be
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "")?;

    let mut settings = ThemeSettings::load(FilePreferenceStore::new(&blocker));
    assert!(settings.set_theme(Theme::Dark).is_err());
    assert_eq!(settings.theme(), Theme::Dark);

    Ok(())
}

#[test]
fn test_memory_store() -> anyhow::Result<()> {
    let mut settings = ThemeSettings::load(MemoryPreferenceStore::with_theme(Theme::Dark));
    assert_eq!(settings.theme(), Theme::Dark);

    settings.set_theme(Theme::Light)?;
    assert_eq!(settings.store().load()?, Some(Theme::Light));

    Ok(())
}
