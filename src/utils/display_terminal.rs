//! 터미널 출력 포맷팅 유틸리티
//!
//! 부팅 과정(레지스트리 초기화, 설정 요약)을 사람이 읽기 쉬운 형태로 출력합니다.
//! 로그 레벨과 무관하게 항상 보여야 하는 정보만 이 모듈을 사용합니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태의 제목 출력
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// 키-값 목록을 정렬된 두 열로 출력 (설정 요약용)
pub fn print_key_values(title: &str, entries: &[(&str, String)]) {
    print_boxed_title(title);
    let key_width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in entries {
        println!("   {:<width$} : {}", key, value, width = key_width);
    }
    println!();
}
