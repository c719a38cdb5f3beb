#![allow(non_snake_case)]

use super::*;

fn leaked_sink() -> &'static HostLogSink {
    Box::leak(Box::new(HostLogSink::new()))
}

#[test]
fn LevelControl___without_filter___moves_sink_only() {
    let sink = leaked_sink();
    let control = LevelControl::new(sink);

    control.set_level(LogLevel::Error).unwrap();

    assert!(!control.is_installed());
    assert_eq!(sink.level(), LogLevel::Error);
    assert_eq!(control.level(), LogLevel::Error);
}

#[test]
fn LevelControl___installed___reloads_filter_and_sink() {
    let (_layer, filter) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
    let sink = leaked_sink();
    let control = LevelControl::new(sink);
    assert!(control.install(filter.clone()));

    control.set_level(LogLevel::Warn).unwrap();

    assert_eq!(filter.clone_current(), Some(LevelFilter::WARN));
    assert_eq!(sink.level(), LogLevel::Warn);
}

#[test]
fn LevelControl___second_install___ignored() {
    let (_first_layer, first) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
    let (_second_layer, second) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
    let control = LevelControl::new(leaked_sink());
    control.install(first.clone());

    assert!(!control.install(second.clone()));
    control.set_level(LogLevel::Trace).unwrap();

    assert_eq!(first.clone_current(), Some(LevelFilter::TRACE));
    assert_eq!(second.clone_current(), Some(LevelFilter::INFO));
}

#[test]
fn level_filter___each_level___matching_filter() {
    assert_eq!(level_filter(LogLevel::Trace), LevelFilter::TRACE);
    assert_eq!(level_filter(LogLevel::Info), LevelFilter::INFO);
    assert_eq!(level_filter(LogLevel::Off), LevelFilter::OFF);
}
