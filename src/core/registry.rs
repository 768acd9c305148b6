//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `#[service]` / `#[repository]` 매크로가 생성한 등록 정보를 `inventory`로 수집하고,
//! 요청된 타입에 맞는 싱글톤 인스턴스를 만들어 돌려주는 컨테이너입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service(name = "verification")]   → ServiceRegistration
//!    ├─ #[repository(name = "otp", ...)]    → RepositoryRegistration
//!    └─ inventory::collect!                 → 전역 목록에 수집
//!
//! 2. 런타임 (main)
//!    ├─ ServiceLocator::set(Arc<Database>)            인프라 직접 등록
//!    ├─ ServiceLocator::set(Arc<VerificationSettings>) 설정 값 직접 등록
//!    └─ ServiceLocator::initialize_all()               리포지토리 → 서비스 생성
//!
//! 3. 의존성 주입
//!    └─ Arc<T> 필드 → ServiceLocator::get::<T>()
//!         ├─ TypeId 캐시 조회 (직접 등록된 값 포함)
//!         └─ 없으면 타입 이름으로 등록 정보를 찾아 생성 후 캐시
//! ```
//!
//! ## 이름 규칙
//!
//! 타입 이름에서 접미사를 떼고 소문자로 바꾼 값이 매크로의 `name`과 같아야 합니다.
//!
//! | 타입 | 매칭되는 이름 |
//! |------|---------------|
//! | `UserRepository` | `user` |
//! | `OtpRepository` | `otp` |
//! | `VerificationService` | `verification` |
//! | `MailService` | `mail` |

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// 비즈니스 로직 서비스 공통 인터페이스 (`#[service]`가 구현)
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리 식별 이름
    fn name(&self) -> &str;

    /// 생성 직후 한 번 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리 공통 인터페이스 (`#[repository]`가 구현)
#[async_trait]
pub trait Repository: Send + Sync {
    /// 레지스트리 식별 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 데이터 계층 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 생성하는 등록 메타데이터
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 생성하는 등록 메타데이터
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 정규화된 이름 → 서비스 생성자
static SERVICE_NAME_CACHE: Lazy<HashMap<String, (&'static str, fn() -> Box<dyn Any + Send + Sync>)>> =
    Lazy::new(|| {
        let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
            .map(|r| (normalize_registration_name(r.name), (r.name, r.constructor)))
            .collect();
        print_cache_initialized("Service", cache.len());
        cache
    });

/// 정규화된 이름 → 리포지토리 생성자
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, (&'static str, fn() -> Box<dyn Any + Send + Sync>)>> =
    Lazy::new(|| {
        let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
            .map(|r| (normalize_registration_name(r.name), (r.name, r.constructor)))
            .collect();
        print_cache_initialized("Repository", cache.len());
        cache
    });

/// `otp_repository` → `otp`, `verification_service` → `verification`
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `account_service_backend::repositories::OtpRepository` → `OtpRepository`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 타입 이름이 가리키는 컴포넌트 종류
enum ComponentKind {
    Repository(String),
    Service(String),
}

impl ComponentKind {
    fn of(short_name: &str) -> Option<Self> {
        if let Some(entity) = short_name.strip_suffix("Repository") {
            return Some(ComponentKind::Repository(entity.to_lowercase()));
        }
        if let Some(entity) = short_name.strip_suffix("Service") {
            return Some(ComponentKind::Service(entity.to_lowercase()));
        }
        None
    }
}

/// 싱글톤 의존성 주입 컨테이너
///
/// 타입당 하나의 인스턴스를 `TypeId` 키로 보관합니다.
/// 생성 중인 타입을 `initializing`에 기록해 순환 의존을 즉시 패닉으로 드러냅니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn read_instances(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_instances(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.instances.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_initializing(&self) -> RwLockWriteGuard<'_, HashSet<TypeId>> {
        self.initializing.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cached<T: 'static + Send + Sync>(&self) -> Option<Arc<T>> {
        self.read_instances()
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 1. 캐시(직접 등록된 인프라/설정 포함)에서 `TypeId`로 조회
    /// 2. 없으면 타입 이름을 `Repository` / `Service` 접미사로 분류
    /// 3. 해당 레지스트리의 생성자를 호출하고 결과를 캐시
    ///
    /// # Panics
    ///
    /// - 순환 의존 (`A → B → A`)
    /// - 등록되지 않은 타입
    /// - 등록 이름은 맞지만 생성된 타입이 다른 경우
    ///
    /// 모두 부팅 시점의 배선 오류이므로 요청 처리 중에는 발생하지 않습니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        if let Some(instance) = LOCATOR.cached::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if !LOCATOR.write_initializing().insert(type_id) {
            log::error!("❌ Circular dependency detected for type: {}", type_name);
            panic!("Circular dependency detected: {} is already being initialized", type_name);
        }

        // 생성자는 자신의 의존성을 다시 get()으로 해결하므로 락을 잡지 않은 채 호출합니다.
        let instance = Self::construct::<T>(type_name);

        LOCATOR.write_initializing().remove(&type_id);

        // 다른 스레드가 먼저 만들었다면 그 인스턴스를 유지
        let mut instances = LOCATOR.write_instances();
        let stored = instances
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
            .clone();
        drop(instances);

        match stored.downcast::<T>() {
            Ok(instance) => instance,
            Err(_) => panic!("Type mismatch in ServiceLocator for {}", type_name),
        }
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Arc<T> {
        let short_name = short_type_name(type_name);

        let (registered_name, constructor) = match ComponentKind::of(short_name) {
            Some(ComponentKind::Repository(entity)) => *REPOSITORY_NAME_CACHE
                .get(&entity)
                .unwrap_or_else(|| {
                    LOCATOR.write_initializing().remove(&TypeId::of::<T>());
                    panic!("No repository found for entity: {}", entity)
                }),
            Some(ComponentKind::Service(entity)) => *SERVICE_NAME_CACHE
                .get(&entity)
                .unwrap_or_else(|| {
                    LOCATOR.write_initializing().remove(&TypeId::of::<T>());
                    panic!("No service found for entity: {}", entity)
                }),
            None => {
                LOCATOR.write_initializing().remove(&TypeId::of::<T>());
                panic!(
                    "Service not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()",
                    type_name
                )
            }
        };

        match constructor().downcast::<Arc<T>>() {
            Ok(instance) => (*instance).clone(),
            Err(_) => {
                LOCATOR.write_initializing().remove(&TypeId::of::<T>());
                panic!("Type mismatch for component: {}", registered_name)
            }
        }
    }

    /// 매크로로 관리되지 않는 인스턴스를 직접 등록합니다.
    ///
    /// `Database`, `RedisClient` 같은 인프라와 `VerificationSettings` 같은
    /// 설정 값을 `initialize_all()` 이전에 등록해야 합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(Arc::new(VerificationSettings::from_env()));
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        log::info!("📦 Registering: {}", short_type_name(std::any::type_name::<T>()));
        LOCATOR
            .write_instances()
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 만들고 서비스를 나중에 만들어, 서비스 생성 시점에
    /// 데이터 계층 의존성이 이미 준비되어 있도록 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_count = Self::construct_all(
            1,
            "Repository",
            inventory::iter::<RepositoryRegistration>().map(|r| (r.name, r.constructor)),
        );
        let service_count = Self::construct_all(
            2,
            "Service",
            inventory::iter::<ServiceRegistration>().map(|r| (r.name, r.constructor)),
        );

        print_final_summary(repo_count, service_count);
        Ok(())
    }

    fn construct_all(
        step: u8,
        kind: &str,
        registrations: impl Iterator<Item = (&'static str, fn() -> Box<dyn Any + Send + Sync>)>,
    ) -> usize {
        let registrations: Vec<_> = registrations.collect();
        if registrations.is_empty() {
            return 0;
        }

        print_step_start(step, &format!("Creating {} instances", kind));
        for (name, constructor) in &registrations {
            print_sub_task(name, "Creating...");
            let _instance = constructor();
            print_sub_task(name, "✓ Created");
        }
        print_step_complete(step, &format!("{} instances created", kind), registrations.len());

        registrations.len()
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualSettings {
        ttl_minutes: i64,
    }

    #[test]
    fn test_normalize_registration_name() {
        assert_eq!(normalize_registration_name("otp_repository"), "otp");
        assert_eq!(normalize_registration_name("verification_service"), "verification");
        assert_eq!(normalize_registration_name("mail"), "mail");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(
            short_type_name("account_service_backend::repositories::OtpRepository"),
            "OtpRepository"
        );
        assert_eq!(short_type_name("MailService"), "MailService");
    }

    #[test]
    fn test_component_kind_classification() {
        match ComponentKind::of("OtpRepository") {
            Some(ComponentKind::Repository(entity)) => assert_eq!(entity, "otp"),
            _ => panic!("Expected repository"),
        }
        match ComponentKind::of("VerificationService") {
            Some(ComponentKind::Service(entity)) => assert_eq!(entity, "verification"),
            _ => panic!("Expected service"),
        }
        assert!(ComponentKind::of("VerificationSettings").is_none());
    }

    #[test]
    fn test_manually_registered_instance_is_returned() {
        ServiceLocator::set(Arc::new(ManualSettings { ttl_minutes: 10 }));

        let first = ServiceLocator::get::<ManualSettings>();
        let second = ServiceLocator::get::<ManualSettings>();

        assert_eq!(first.ttl_minutes, 10);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
