use super::*;

fn env(
    no_color: Option<&str>,
    force_color: Option<&str>,
    clicolor: Option<&str>,
    ci: Option<&str>,
) -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: no_color.map(str::to_string),
        force_color: force_color.map(str::to_string),
        clicolor: clicolor.map(str::to_string),
        ci: ci.map(str::to_string),
    }
}

#[test]
fn test_no_color_disables_color() {
    let color = env(Some("1"), None, None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_force_color_enables_color() {
    let color = env(None, Some("1"), None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_force_color_wins_over_no_color_and_clicolor() {
    let color =
        env(Some("1"), Some("1"), Some("0"), None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Always);
}

#[test]
fn test_ci_disables_color() {
    let color = env(None, None, None, Some("true")).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let color = env(Some(""), None, None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let color = env(None, Some("invalid"), None, None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Auto);
}

#[test]
fn test_clicolor_zero_disables_color() {
    let color = env(None, None, Some("0"), None).apply_color_config(ColorIntent::Auto);
    assert_eq!(color, ColorIntent::Never);
}
