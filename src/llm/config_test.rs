use super::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers hold `ENV_LOCK` so no other test touches these vars concurrently.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_PROVIDER");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_API_KEY_ENV");
        std::env::remove_var("LLM_GEMINI_BASE_URL");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("ANTHROPIC_API_KEY");
        std::env::remove_var("SPARK_TEST_KEY");
    }
}

#[test]
fn from_env_defaults_to_gemini() {
    let _env = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "SPARK_TEST_KEY");
        std::env::set_var("SPARK_TEST_KEY", "secret");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Gemini);
    assert_eq!(cfg.model, "gemini-2.5-flash");
    assert_eq!(cfg.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(cfg.timeouts, LlmTimeouts::default());
    assert_eq!(cfg.api_key, "secret");

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_anthropic_overrides() {
    let _env = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_PROVIDER", "anthropic");
        std::env::set_var("LLM_API_KEY_ENV", "ANTHROPIC_API_KEY");
        std::env::set_var("ANTHROPIC_API_KEY", "sk-ant");
        std::env::set_var("LLM_MODEL", "claude-haiku");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "30");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "3");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Anthropic);
    assert_eq!(cfg.model, "claude-haiku");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 30, connect_secs: 3 });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_trims_gemini_base_url() {
    let _env = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "SPARK_TEST_KEY");
        std::env::set_var("SPARK_TEST_KEY", "secret");
        std::env::set_var("LLM_GEMINI_BASE_URL", "https://proxy.test/v1beta/");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.gemini_base_url, "https://proxy.test/v1beta");

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_key_var_errors() {
    let _env = env_lock();
    unsafe { clear_llm_env() };
    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "LLM_API_KEY_ENV"));
}

#[test]
fn from_env_missing_named_key_errors() {
    let _env = env_lock();
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "GEMINI_API_KEY");
    }
    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "GEMINI_API_KEY"));
    unsafe { clear_llm_env() };
}

#[test]
fn unknown_provider_is_config_error() {
    assert!(matches!(parse_provider(Some("openai")), Err(LlmError::ConfigParse(_))));
}

#[test]
fn bad_timeout_falls_back_to_default() {
    unsafe { std::env::set_var("__SPARK_TIMEOUT_BAD__", "soon") };
    assert_eq!(env_parse_u64("__SPARK_TIMEOUT_BAD__", 7), 7);
    unsafe { std::env::remove_var("__SPARK_TIMEOUT_BAD__") };
}

#[test]
fn user_gemini_uses_defaults() {
    let cfg = LlmConfig::user_gemini("AIza".into());
    assert_eq!(cfg.provider, LlmProviderKind::Gemini);
    assert_eq!(cfg.model, "gemini-2.5-flash");
    assert_eq!(cfg.api_key, "AIza");
}
