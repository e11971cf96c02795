//! 调度器测试: 缓存、适配器初始化、错误分类

mod common;

use common::{shared, ScriptedAdapter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use translang::{
    AdapterInit, CompletionChoice, Config, DispatcherOptions, ErrorKind, ExtractionStrategy,
    Provider, ProviderAdapter, RawResponse, TextResult, TranslateError, TranslationDispatcher,
};

fn cached() -> DispatcherOptions {
    DispatcherOptions {
        cache_enabled: true,
        ..DispatcherOptions::default()
    }
}

fn dispatcher(adapter: &Arc<ScriptedAdapter>, options: DispatcherOptions) -> TranslationDispatcher {
    TranslationDispatcher::with_adapter(Provider::Google, options, adapter.clone())
}

#[tokio::test]
async fn test_cache_hit_skips_adapter() {
    let adapter = shared(ScriptedAdapter::echo());
    let dispatcher = dispatcher(&adapter, cached());

    let first = dispatcher.translate("hello", "fr").await.unwrap();
    let second = dispatcher.translate("hello", "fr").await.unwrap();

    assert_eq!(first, "HELLO@fr");
    assert_eq!(second, first);
    assert_eq!(adapter.calls(), 1);
    assert_eq!(dispatcher.cached_len(), 1);
}

#[tokio::test]
async fn test_cache_key_includes_language() {
    let adapter = shared(ScriptedAdapter::echo());
    let dispatcher = dispatcher(&adapter, cached());

    let fr = dispatcher.translate("hello", "fr").await.unwrap();
    let de = dispatcher.translate("hello", "de").await.unwrap();
    let other = dispatcher.translate("hello!", "fr").await.unwrap();

    assert_eq!(fr, "HELLO@fr");
    assert_eq!(de, "HELLO@de");
    assert_eq!(other, "HELLO!@fr");
    assert_eq!(adapter.calls(), 3);
    assert_eq!(dispatcher.cached_len(), 3);
}

#[tokio::test]
async fn test_cache_is_case_sensitive() {
    let adapter = shared(ScriptedAdapter::echo());
    let dispatcher = dispatcher(&adapter, cached());

    dispatcher.translate("Hello", "fr").await.unwrap();
    dispatcher.translate("hello", "fr").await.unwrap();
    dispatcher.translate("hello", "FR").await.unwrap();

    assert_eq!(adapter.calls(), 3);
}

#[tokio::test]
async fn test_concurrent_same_key_calls_both_reach_adapter() {
    // 未命中的并发同键请求各自调用后端，缓存只保留一条
    let adapter = shared(ScriptedAdapter::echo().with_delay("hello", Duration::from_millis(20)));
    let dispatcher = dispatcher(&adapter, cached());

    let (first, second) = tokio::join!(
        dispatcher.translate("hello", "fr"),
        dispatcher.translate("hello", "fr")
    );

    assert_eq!(first.unwrap(), "HELLO@fr");
    assert_eq!(second.unwrap(), "HELLO@fr");
    assert_eq!(adapter.calls(), 2);
    assert_eq!(dispatcher.cached_len(), 1);

    dispatcher.translate("hello", "fr").await.unwrap();
    assert_eq!(adapter.calls(), 2);
}

#[tokio::test]
async fn test_cache_disabled_by_default() {
    let adapter = shared(ScriptedAdapter::echo());
    let dispatcher = dispatcher(&adapter, DispatcherOptions::default());

    dispatcher.translate("hello", "fr").await.unwrap();
    dispatcher.translate("hello", "fr").await.unwrap();

    assert_eq!(adapter.calls(), 2);
    assert_eq!(dispatcher.cached_len(), 0);
}

#[tokio::test]
async fn test_failed_translation_is_not_cached() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let adapter = shared(ScriptedAdapter::new(move |text, _| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(TranslateError::Provider("Too many requests".to_string()))
        } else {
            Ok(RawResponse::Text(text.to_string()))
        }
    }));
    let dispatcher = dispatcher(&adapter, cached());

    let err = dispatcher.translate("hello", "fr").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert_eq!(dispatcher.cached_len(), 0);

    assert_eq!(dispatcher.translate("hello", "fr").await.unwrap(), "hello");
    assert_eq!(adapter.calls(), 2);
}

#[tokio::test]
async fn test_clones_share_cache() {
    let adapter = shared(ScriptedAdapter::echo());
    let dispatcher = dispatcher(&adapter, cached());
    let clone = dispatcher.clone();

    dispatcher.translate("hello", "fr").await.unwrap();
    clone.translate("hello", "fr").await.unwrap();

    assert_eq!(adapter.calls(), 1);
    clone.clear_cache();
    assert_eq!(dispatcher.cached_len(), 0);
}

#[tokio::test]
async fn test_structured_response_yields_text_field() {
    let adapter = shared(ScriptedAdapter::new(|_, _| {
        Ok(RawResponse::Structured(TextResult {
            text: "Hallo".to_string(),
            detected_source_language: Some("EN".to_string()),
        }))
    }));
    let dispatcher = dispatcher(&adapter, DispatcherOptions::default());

    assert_eq!(dispatcher.translate("hello", "de").await.unwrap(), "Hallo");
}

#[tokio::test]
async fn test_chat_answer_quoted_extraction() {
    let adapter = shared(ScriptedAdapter::new(|_, _| {
        Ok(RawResponse::Chat("The translation is \"bonjour\"".to_string()))
    }));
    let dispatcher = dispatcher(&adapter, DispatcherOptions::default());

    assert_eq!(dispatcher.translate("hello", "fr").await.unwrap(), "bonjour");
}

#[tokio::test]
async fn test_chat_answer_without_quotes_is_extraction_error() {
    let adapter = shared(ScriptedAdapter::new(|_, _| {
        Ok(RawResponse::Chat("The translation is bonjour".to_string()))
    }));
    let dispatcher = dispatcher(&adapter, cached());

    let err = dispatcher.translate("hello", "fr").await.unwrap_err();
    assert!(matches!(err, TranslateError::Extraction(_)));
    assert_eq!(err.kind(), ErrorKind::Extraction);
    assert_eq!(dispatcher.cached_len(), 0);
}

#[tokio::test]
async fn test_chat_answer_fenced_extraction() {
    let adapter = shared(ScriptedAdapter::new(|_, _| {
        Ok(RawResponse::Chat("Sure! **bonjour** is the word.".to_string()))
    }));
    let options = DispatcherOptions {
        extraction: ExtractionStrategy::Fenced,
        ..DispatcherOptions::default()
    };
    let dispatcher = dispatcher(&adapter, options);

    assert_eq!(dispatcher.translate("hello", "fr").await.unwrap(), "bonjour");
}

#[tokio::test]
async fn test_completion_choice_is_trimmed() {
    let adapter = shared(ScriptedAdapter::new(|_, _| {
        Ok(RawResponse::Completion(vec![
            CompletionChoice {
                text: "  bonjour  \n".to_string(),
                index: 0,
                finish_reason: Some("stop".to_string()),
            },
            CompletionChoice {
                text: "salut".to_string(),
                index: 1,
                finish_reason: None,
            },
        ]))
    }));
    let dispatcher = dispatcher(&adapter, DispatcherOptions::default());

    assert_eq!(dispatcher.translate("hello", "fr").await.unwrap(), "bonjour");
}

#[tokio::test]
async fn test_missing_credential_fails_on_first_use() {
    let dispatcher =
        TranslationDispatcher::new(Provider::Deepl, &Config::default(), DispatcherOptions::default())
            .expect("lazy construction succeeds");
    assert!(!dispatcher.is_initialized());

    let err = dispatcher.translate("hello", "fr").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("DeepL API key not configured"));
    assert!(!dispatcher.is_initialized());
}

#[tokio::test]
async fn test_missing_credential_fails_at_construction_when_eager() {
    let options = DispatcherOptions {
        init: AdapterInit::Eager,
        ..DispatcherOptions::default()
    };

    for provider in [Provider::Deepl, Provider::Chat, Provider::OpenAi] {
        let err = TranslationDispatcher::new(provider, &Config::default(), options.clone())
            .err()
            .expect("eager construction must fail without a key");
        assert_eq!(err.kind(), ErrorKind::Configuration, "{}", provider);
    }
}

#[tokio::test]
async fn test_google_needs_no_credential() {
    let options = DispatcherOptions {
        init: AdapterInit::Eager,
        ..DispatcherOptions::default()
    };
    let dispatcher = TranslationDispatcher::new(Provider::Google, &Config::default(), options)
        .expect("google has no credential");

    assert!(dispatcher.is_initialized());
    assert_eq!(dispatcher.provider(), Provider::Google);
}

#[tokio::test]
async fn test_unknown_provider_in_config() {
    let config = Config {
        provider: "babelfish".to_string(),
        ..Config::default()
    };

    let err = TranslationDispatcher::from_config(&config)
        .err()
        .expect("unknown selector");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_adapter_built_once_under_concurrent_first_use() {
    let builds = Arc::new(AtomicUsize::new(0));
    let adapter = shared(ScriptedAdapter::echo());

    let counter = builds.clone();
    let handle = adapter.clone();
    let dispatcher = TranslationDispatcher::with_factory(
        Provider::Google,
        DispatcherOptions::default(),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            Ok(handle.clone() as Arc<dyn ProviderAdapter>)
        }),
    )
    .unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 0);

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move { dispatcher.translate(&format!("t{}", i), "fr").await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert_eq!(adapter.calls(), 8);
}

#[tokio::test]
async fn test_eager_factory_not_called_again() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();
    let options = DispatcherOptions {
        init: AdapterInit::Eager,
        ..DispatcherOptions::default()
    };

    let dispatcher = TranslationDispatcher::with_factory(
        Provider::Google,
        options,
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(ScriptedAdapter::echo()) as Arc<dyn ProviderAdapter>)
        }),
    )
    .unwrap();

    dispatcher.translate("a", "fr").await.unwrap();
    dispatcher.translate("b", "fr").await.unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}
