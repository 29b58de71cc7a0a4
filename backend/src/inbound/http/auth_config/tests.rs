//! Unit tests for credential configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const FULL_SECRET: &str = "0123456789abcdef0123456789abcdef";

fn mock_env(vars: HashMap<&'static str, &'static str>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).map(|value| (*value).to_owned()));
    env
}

fn with_secret(extra: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    let mut vars = HashMap::from([(SECRET_ENV, FULL_SECRET)]);
    vars.extend(extra.iter().copied());
    vars
}

fn expect_error(result: Result<AuthSettings, AuthConfigError>, label: &str) -> AuthConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn missing_secret_is_rejected_in_every_mode(#[case] mode: BuildMode) {
    let env = mock_env(HashMap::new());

    let err = expect_error(
        auth_settings_from_env(&env, mode),
        "expected missing secret to fail",
    );
    assert!(matches!(err, AuthConfigError::MissingEnv { name: SECRET_ENV }));
}

#[rstest]
fn blank_secret_counts_as_missing() {
    let env = mock_env(HashMap::from([(SECRET_ENV, "   ")]));

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Debug),
        "expected blank secret to fail",
    );
    assert!(matches!(err, AuthConfigError::MissingEnv { name: SECRET_ENV }));
}

#[rstest]
fn release_short_secret_is_rejected() {
    let env = mock_env(HashMap::from([(SECRET_ENV, "short")]));

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected short secret to fail",
    );
    assert!(matches!(
        err,
        AuthConfigError::SecretTooShort {
            length: 5,
            min_len: SECRET_MIN_LEN
        }
    ));
}

#[rstest]
fn debug_short_secret_is_accepted() {
    let env = mock_env(HashMap::from([(SECRET_ENV, "short")]));

    let settings =
        auth_settings_from_env(&env, BuildMode::Debug).expect("debug accepts short secrets");
    assert_eq!(settings.token.secret_len(), 5);
}

#[rstest]
fn release_defaults_apply_when_optional_values_are_absent() {
    let env = mock_env(with_secret(&[]));

    let settings = auth_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.token.ttl().num_seconds(), DEFAULT_TOKEN_TTL_SECS);
    assert_eq!(settings.bcrypt_cost, DEFAULT_BCRYPT_COST);
}

#[rstest]
fn explicit_values_are_honoured() {
    let env = mock_env(with_secret(&[(TTL_ENV, "120"), (BCRYPT_COST_ENV, "12")]));

    let settings = auth_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.token.ttl().num_seconds(), 120);
    assert_eq!(settings.bcrypt_cost, 12);
}

#[rstest]
fn one_year_is_the_longest_token_lifetime() {
    let env = mock_env(with_secret(&[(TTL_ENV, "31536000")]));

    let settings = auth_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.token.ttl().num_seconds(), TOKEN_TTL_MAX_SECS);
}

#[rstest]
#[case(TTL_ENV, "0")]
#[case(TTL_ENV, "-5")]
#[case(TTL_ENV, "soon")]
#[case(TTL_ENV, "31536001")]
#[case(TTL_ENV, "9000000000000")]
#[case(BCRYPT_COST_ENV, "3")]
#[case(BCRYPT_COST_ENV, "32")]
#[case(BCRYPT_COST_ENV, "ten")]
fn release_invalid_values_are_rejected(#[case] name: &'static str, #[case] value: &'static str) {
    let env = mock_env(with_secret(&[(name, value)]));

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected invalid value to fail",
    );
    match err {
        AuthConfigError::InvalidEnv {
            name: reported,
            value: echoed,
            ..
        } => {
            assert_eq!(reported, name);
            assert_eq!(echoed, value);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(TTL_ENV, "soon")]
#[case(TTL_ENV, "9000000000000")]
#[case(BCRYPT_COST_ENV, "99")]
fn debug_invalid_values_fall_back_to_defaults(
    #[case] name: &'static str,
    #[case] value: &'static str,
) {
    let env = mock_env(with_secret(&[(name, value)]));

    let settings =
        auth_settings_from_env(&env, BuildMode::Debug).expect("debug should fall back");
    assert_eq!(settings.token.ttl().num_seconds(), DEFAULT_TOKEN_TTL_SECS);
    assert_eq!(settings.bcrypt_cost, DEFAULT_BCRYPT_COST);
}

#[rstest]
fn error_messages_never_echo_the_secret() {
    let env = mock_env(HashMap::from([(SECRET_ENV, "hunter2")]));

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected short secret to fail",
    );
    assert!(!err.to_string().contains("hunter2"));
}
