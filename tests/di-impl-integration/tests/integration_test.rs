//! di-impl 容器的集成测试

use di_abstractions::{
    BoxError, DeclarationError, DeclarationSet, InjectionPoint, ProviderDescriptor, ResolveOptions,
    RoleId,
};
use di_impl::{Container, ContainerConfig, DuplicatePolicy};
use infrastructure_common::DependencyError;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

fn init_test_logger() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

trait Tax: Send + Sync {
    fn add_tax(&self, amount: f64) -> f64;
}

trait Rate: Send + Sync {
    fn value(&self) -> f64;
}

trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;
}

/// 固定 55% 税率
struct FlatTax;

impl Tax for FlatTax {
    fn add_tax(&self, amount: f64) -> f64 {
        amount * 0.55
    }
}

/// 税率来自注入的 Rate，零参数工厂创建时税率为 0
struct RateTax {
    rate: Option<Box<dyn Rate>>,
}

impl Tax for RateTax {
    fn add_tax(&self, amount: f64) -> f64 {
        amount * self.rate.as_ref().map(|rate| rate.value()).unwrap_or(0.0)
    }
}

struct FixedRate;

impl Rate for FixedRate {
    fn value(&self) -> f64 {
        0.2
    }
}

struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }
}

struct Account {
    tax: Box<dyn Tax>,
    total: f64,
}

impl Account {
    fn new(tax: Box<dyn Tax>) -> Self {
        Self { tax, total: 0.0 }
    }

    fn apply(&self, amount: f64) -> f64 {
        self.tax.add_tax(amount)
    }

    fn annual_tax(&self) -> f64 {
        self.tax.add_tax(self.total)
    }
}

struct Invoice {
    tax: Box<dyn Tax>,
    notifier: Box<dyn Notifier>,
}

fn flat_tax() -> ProviderDescriptor {
    ProviderDescriptor::with_cast::<dyn Tax, FlatTax, _, _>(
        || Ok(Box::new(FlatTax) as Box<dyn Tax>),
        |tax: FlatTax| Box::new(tax) as Box<dyn Tax>,
    )
}

fn rate_tax() -> ProviderDescriptor {
    ProviderDescriptor::with_cast::<dyn Tax, RateTax, _, _>(
        || Ok(Box::new(RateTax { rate: None }) as Box<dyn Tax>),
        |tax: RateTax| Box::new(tax) as Box<dyn Tax>,
    )
}

fn fixed_rate() -> ProviderDescriptor {
    ProviderDescriptor::new::<dyn Rate, FixedRate, _>(|| Ok(Box::new(FixedRate) as Box<dyn Rate>))
}

fn email_notifier() -> ProviderDescriptor {
    ProviderDescriptor::new::<dyn Notifier, EmailNotifier, _>(|| {
        Ok(Box::new(EmailNotifier) as Box<dyn Notifier>)
    })
}

fn account_point() -> InjectionPoint {
    InjectionPoint::new::<Account, _>(vec![RoleId::of::<dyn Tax>()], |mut arguments| {
        Ok(Account::new(arguments.take::<dyn Tax>(0)?))
    })
}

fn rate_tax_point() -> InjectionPoint {
    InjectionPoint::new::<RateTax, _>(vec![RoleId::of::<dyn Rate>()], |mut arguments| {
        Ok(RateTax {
            rate: Some(arguments.take::<dyn Rate>(0)?),
        })
    })
}

fn invoice_point() -> InjectionPoint {
    InjectionPoint::new::<Invoice, _>(
        vec![RoleId::of::<dyn Tax>(), RoleId::of::<dyn Notifier>()],
        |mut arguments| {
            Ok(Invoice {
                tax: arguments.take::<dyn Tax>(0)?,
                notifier: arguments.take::<dyn Notifier>(1)?,
            })
        },
    )
}

#[test]
fn test_account_with_flat_tax() {
    init_test_logger();
    let declarations = DeclarationSet::new("account")
        .with_provider(flat_tax())
        .with_injection_point(account_point());
    let container = Container::builder().with_source(declarations).build();

    let mut account = container.build::<Account>().unwrap().unwrap();
    assert!((account.apply(100.0) - 55.0).abs() < 1e-9);

    account.total = 1000.0;
    assert!((account.annual_tax() - 550.0).abs() < 1e-9);
}

#[test]
fn test_parameters_are_filled_in_order() {
    init_test_logger();
    let declarations = DeclarationSet::new("invoice")
        .with_provider(flat_tax())
        .with_provider(email_notifier())
        .with_injection_point(invoice_point());
    let container = Container::builder().with_source(declarations).build();

    let invoice = container.build::<Invoice>().unwrap().unwrap();
    assert!((invoice.tax.add_tax(10.0) - 5.5).abs() < 1e-9);
    assert_eq!(invoice.notifier.channel(), "email");
}

#[test]
fn test_unknown_type_then_known_type() {
    init_test_logger();
    let declarations = DeclarationSet::new("account")
        .with_provider(flat_tax())
        .with_injection_point(account_point());
    let container = Container::builder().with_source(declarations).build();

    assert!(container.build::<Invoice>().unwrap().is_none());
    assert!(container.build::<Account>().unwrap().is_some());
}

#[test]
fn test_last_registered_provider_wins() {
    init_test_logger();
    let declarations = DeclarationSet::new("account")
        .with_provider(flat_tax())
        .with_provider(rate_tax())
        .with_injection_point(account_point());
    let container = Container::builder().with_source(declarations).build();

    let account = container.build::<Account>().unwrap().unwrap();
    assert_eq!(account.apply(100.0), 0.0);
    assert_eq!(container.report().providers_overwritten, 1);
}

#[test]
fn test_missing_provider_is_an_error() {
    init_test_logger();
    let declarations = DeclarationSet::new("invoice")
        .with_provider(flat_tax())
        .with_injection_point(invoice_point());
    let container = Container::builder().with_source(declarations).build();

    match container.build::<Invoice>() {
        Err(DependencyError::UnresolvedParameter { role, position, .. }) => {
            assert_eq!(position, 1);
            assert!(role.ends_with("Notifier"));
        }
        Err(other) => panic!("期望参数解析失败, 实际: {other}"),
        Ok(invoice) => panic!("期望参数解析失败, 实际得到实例: {}", invoice.is_some()),
    }
}

#[test]
fn test_constructor_failure_carries_cause() {
    init_test_logger();
    let declarations = DeclarationSet::new("failing").with_provider(flat_tax()).with_injection_point(
        InjectionPoint::new::<Account, _>(vec![RoleId::of::<dyn Tax>()], |_| {
            Err(BoxError::from("账户已冻结"))
        }),
    );
    let container = Container::builder().with_source(declarations).build();

    match container.build::<Account>() {
        Err(DependencyError::ConstructionFailed { type_name, source }) => {
            assert!(type_name.ends_with("Account"));
            assert_eq!(source.to_string(), "账户已冻结");
        }
        Err(other) => panic!("期望构造失败, 实际: {other}"),
        Ok(account) => panic!("期望构造失败, 实际得到实例: {}", account.is_some()),
    }
}

#[test]
fn test_binding_pins_provider() {
    init_test_logger();
    let declarations = DeclarationSet::new("account")
        .with_provider(flat_tax())
        .with_provider(rate_tax())
        .with_injection_point(account_point());
    let config = ContainerConfig::default()
        .with_binding("Tax", "FlatTax")
        .with_binding("Currency", "Real");
    let container = Container::builder()
        .with_source(declarations)
        .with_config(config)
        .build();

    let account = container.build::<Account>().unwrap().unwrap();
    assert!((account.apply(100.0) - 55.0).abs() < 1e-9);
    assert_eq!(container.report().bindings_applied, 1);
    assert_eq!(
        container.report().skipped,
        vec![DeclarationError::UnknownRole {
            name: "Currency".to_string()
        }]
    );
}

#[test]
fn test_reject_policy_keeps_first_injection_point() {
    init_test_logger();
    let declarations = DeclarationSet::new("account")
        .with_provider(flat_tax())
        .with_injection_point(account_point())
        .with_injection_point(InjectionPoint::new::<Account, _>(Vec::new(), |_| {
            Ok(Account::new(Box::new(RateTax { rate: None })))
        }));
    let config = ContainerConfig::default().with_duplicate_policy(DuplicatePolicy::Reject);
    let container = Container::builder()
        .with_source(declarations)
        .with_config(config)
        .build();

    let account = container.build::<Account>().unwrap().unwrap();
    assert!((account.apply(100.0) - 55.0).abs() < 1e-9);
    assert!(matches!(
        container.report().skipped.as_slice(),
        [DeclarationError::DuplicateInjectionPoint { .. }]
    ));
}

#[test]
fn test_last_wins_policy_replaces_injection_point() {
    init_test_logger();
    let declarations = DeclarationSet::new("account")
        .with_provider(flat_tax())
        .with_injection_point(account_point())
        .with_injection_point(InjectionPoint::new::<Account, _>(Vec::new(), |_| {
            Ok(Account::new(Box::new(RateTax { rate: None })))
        }));
    let container = Container::builder().with_source(declarations).build();

    let account = container.build::<Account>().unwrap().unwrap();
    assert_eq!(account.apply(100.0), 0.0);
    assert!(container.report().is_clean());
}

fn recursive_declarations() -> DeclarationSet {
    DeclarationSet::new("recursive")
        .with_provider(rate_tax())
        .with_provider(fixed_rate())
        .with_injection_point(rate_tax_point())
        .with_injection_point(account_point())
}

#[test]
fn test_shallow_mode_does_not_fill_provider_dependencies() {
    init_test_logger();
    let container = Container::builder().with_source(recursive_declarations()).build();

    let account = container.build::<Account>().unwrap().unwrap();
    assert_eq!(account.apply(100.0), 0.0);
}

#[test]
fn test_recursive_mode_fills_provider_dependencies() {
    init_test_logger();
    let config = ContainerConfig::default().with_resolution(ResolveOptions::recursive());
    let container = Container::builder()
        .with_source(recursive_declarations())
        .with_config(config)
        .build();

    let account = container.build::<Account>().unwrap().unwrap();
    assert!((account.apply(100.0) - 20.0).abs() < 1e-9);
}

#[test]
fn test_recursive_mode_respects_depth_limit() {
    init_test_logger();
    let config = ContainerConfig::default()
        .with_resolution(ResolveOptions::recursive().with_max_depth(1));
    let container = Container::builder()
        .with_source(recursive_declarations())
        .with_config(config)
        .build();

    assert!(matches!(
        container.build::<Account>(),
        Err(DependencyError::DepthExceeded { max_depth: 1, .. })
    ));
}

struct EchoTax {
    inner: Box<dyn Tax>,
}

impl Tax for EchoTax {
    fn add_tax(&self, amount: f64) -> f64 {
        self.inner.add_tax(amount)
    }
}

#[test]
fn test_recursive_mode_detects_cycles() {
    init_test_logger();
    let declarations = DeclarationSet::new("cycle")
        .with_provider(ProviderDescriptor::with_cast::<dyn Tax, EchoTax, _, _>(
            || {
                Ok(Box::new(EchoTax {
                    inner: Box::new(FlatTax),
                }) as Box<dyn Tax>)
            },
            |tax: EchoTax| Box::new(tax) as Box<dyn Tax>,
        ))
        .with_injection_point(InjectionPoint::new::<EchoTax, _>(
            vec![RoleId::of::<dyn Tax>()],
            |mut arguments| {
                Ok(EchoTax {
                    inner: arguments.take::<dyn Tax>(0)?,
                })
            },
        ))
        .with_injection_point(account_point());
    let config = ContainerConfig::default().with_resolution(ResolveOptions::recursive());
    let container = Container::builder()
        .with_source(declarations)
        .with_config(config)
        .build();

    match container.build::<Account>() {
        Err(DependencyError::CircularDependency { dependency_chain }) => {
            assert_eq!(dependency_chain, "Account -> EchoTax -> EchoTax");
        }
        Err(other) => panic!("期望循环依赖错误, 实际: {other}"),
        Ok(account) => panic!("期望循环依赖错误, 实际得到实例: {}", account.is_some()),
    }
}

#[test]
fn test_container_from_config_file() {
    init_test_logger();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "bindings": { "Tax": "RateTax" },
            "resolution": { "mode": "recursive" }
        }"#,
    )
    .unwrap();

    let config = ContainerConfig::load(file.path()).unwrap();
    let declarations = recursive_declarations().with_provider(flat_tax());
    let container = Container::builder()
        .with_source(declarations)
        .with_config(config)
        .build();

    let account = container.build::<Account>().unwrap().unwrap();
    assert!((account.apply(100.0) - 20.0).abs() < 1e-9);
    assert!(container.options().is_recursive());
}
