//! # 설정 모듈 테스트
